use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ats::clusters::SkillClusters;
use crate::models::lenient;

/// One role on the candidate's work history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_list", skip_serializing_if = "Vec::is_empty")]
    pub achievements: Vec<String>,
    /// Unrecognized keys (e.g. `description`), kept for keyword scanning.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resume-like input accepted by the scorer. Every field is optional;
/// missing or wrong-typed values are defaulted during deserialization.
/// Keys outside the known set are carried through so that the scoring
/// narrative covers everything the caller sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeInput {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::object_list", skip_serializing_if = "Vec::is_empty")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "lenient::object_list", skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<EducationEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fully-defaulted resume produced by the generator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub name: String,
    pub headline: String,
    pub summary: String,
    pub target_role: String,
    pub skills: Vec<String>,
    pub clustered_skills: SkillClusters,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

/// The fields the ATS scorer reads. The whole value is also serialized
/// into the keyword-scanning narrative.
pub trait ScorableResume: Serialize {
    fn target_role(&self) -> &str;
    fn skills(&self) -> &[String];
    fn experience(&self) -> &[ExperienceEntry];
}

impl ScorableResume for ResumeInput {
    fn target_role(&self) -> &str {
        self.target_role.as_deref().unwrap_or_default()
    }

    fn skills(&self) -> &[String] {
        &self.skills
    }

    fn experience(&self) -> &[ExperienceEntry] {
        &self.experience
    }
}

impl ScorableResume for Resume {
    fn target_role(&self) -> &str {
        &self.target_role
    }

    fn skills(&self) -> &[String] {
        &self.skills
    }

    fn experience(&self) -> &[ExperienceEntry] {
        &self.experience
    }
}
