use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillSet {
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: Option<String>,
    pub year: Option<String>,
}

/// A resume document with typed nested sections, owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub template: String,
    pub personal_info: Json<PersonalInfo>,
    pub summary: Option<String>,
    pub experience: Json<Vec<ExperienceEntry>>,
    pub education: Json<Vec<EducationEntry>>,
    pub skills: Json<SkillSet>,
    pub projects: Json<Vec<ProjectEntry>>,
    pub certifications: Json<Vec<Certification>>,
    /// Denormalized copy of the most recent assessment's overall score.
    pub ats_score: Option<i32>,
    pub target_role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-category ATS subscores. The caps across all categories sum to 100.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryScores {
    pub contact: u32,
    pub summary: u32,
    pub experience: u32,
    pub education: u32,
    pub skills: u32,
    pub projects: u32,
    pub certifications: u32,
}

impl CategoryScores {
    /// Sum of all category subscores.
    pub fn total(&self) -> u32 {
        self.contact
            + self.summary
            + self.experience
            + self.education
            + self.skills
            + self.projects
            + self.certifications
    }
}

/// One stored assessment run. Append-only history per resume.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AtsAssessmentRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub overall_score: i32,
    pub scores: Json<CategoryScores>,
    pub feedback: Vec<String>,
    pub assessed_at: DateTime<Utc>,
}
