//! Learning-roadmap generation from a job posting.

use serde::Serialize;

use crate::models::job::JobRow;

const MAX_PREP_TOPICS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct RoadmapSkill {
    pub name: String,
    pub category: String,
    pub priority: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LearningResource {
    pub title: String,
    pub resource_type: String,
    pub url: String,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewPrep {
    pub topics: Vec<String>,
    pub common_questions: Vec<String>,
    pub coding_problems: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Roadmap {
    pub role: String,
    pub skills: Vec<RoadmapSkill>,
    pub resources: Vec<LearningResource>,
    pub timeline: String,
    pub interview_prep: InterviewPrep,
}

/// Builds the roadmap for a job posting: one tracked entry per required
/// skill, stock resources referencing the title, and an interview prep
/// block seeded from the first few requirements.
pub fn build_roadmap(job: &JobRow) -> Roadmap {
    let skills = job
        .skills
        .iter()
        .map(|skill| RoadmapSkill {
            name: skill.clone(),
            category: "Technical".to_string(),
            priority: "High".to_string(),
            status: "Not Started".to_string(),
        })
        .collect();

    let resources = vec![
        LearningResource {
            title: format!("{} Complete Guide", job.title),
            resource_type: "Course".to_string(),
            url: "#".to_string(),
            duration: Some("40 hours".to_string()),
        },
        LearningResource {
            title: "Interview Preparation".to_string(),
            resource_type: "Article".to_string(),
            url: "#".to_string(),
            duration: None,
        },
    ];

    let topics = job
        .requirements
        .iter()
        .take(MAX_PREP_TOPICS)
        .cloned()
        .collect();

    Roadmap {
        role: job.title.clone(),
        skills,
        resources,
        timeline: "3-6 months".to_string(),
        interview_prep: InterviewPrep {
            topics,
            common_questions: vec![
                "Tell me about yourself".to_string(),
                "Why do you want this role?".to_string(),
                "Describe a challenging project".to_string(),
            ],
            coding_problems: vec![
                "Array manipulation".to_string(),
                "String algorithms".to_string(),
                "Data structures".to_string(),
            ],
        },
    }
}
