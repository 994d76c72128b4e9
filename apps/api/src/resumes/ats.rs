//! ATS readiness scoring for resume documents.
//!
//! Category-based and purely structural: each section contributes up to a
//! fixed cap and the caps sum to exactly 100. No job description is
//! consulted; the score measures how complete and machine-readable the
//! document itself is. Persisting a run is the caller's concern.

use crate::models::resume::{CategoryScores, ResumeRow};

pub const CONTACT_CAP: u32 = 10;
pub const SUMMARY_CAP: u32 = 10;
pub const EXPERIENCE_CAP: u32 = 30;
pub const EDUCATION_CAP: u32 = 15;
pub const SKILLS_CAP: u32 = 20;
pub const PROJECTS_CAP: u32 = 10;
pub const CERTIFICATIONS_CAP: u32 = 5;

pub const POINTS_PER_EXPERIENCE: u32 = 10;
pub const POINTS_PER_SKILL: u32 = 2;
pub const POINTS_PER_PROJECT: u32 = 5;

/// A summary must exceed this many characters to earn its credit.
pub const SUMMARY_MIN_CHARS: usize = 50;

/// One assessment run, not yet persisted.
#[derive(Debug, Clone)]
pub struct Assessment {
    pub overall_score: u32,
    pub scores: CategoryScores,
    pub feedback: Vec<String>,
}

/// Scores a resume document category by category.
///
/// Feedback carries one improvement suggestion per category that fell short
/// of its cap; a maximal document yields none.
pub fn assess(resume: &ResumeRow) -> Assessment {
    let mut scores = CategoryScores::default();
    let mut feedback = Vec::new();

    // Contact information: email, phone, and one professional link.
    let info = &resume.personal_info.0;
    if present(&info.email) {
        scores.contact += 3;
    }
    if present(&info.phone) {
        scores.contact += 3;
    }
    if present(&info.linkedin) || present(&info.github) {
        scores.contact += 4;
    }
    if scores.contact < CONTACT_CAP {
        feedback.push(
            "Complete your contact details: email, phone, and a LinkedIn or GitHub link"
                .to_string(),
        );
    }

    // Summary: binary credit for a substantive one.
    let summary_len = resume
        .summary
        .as_deref()
        .map(|s| s.trim().chars().count())
        .unwrap_or(0);
    if summary_len > SUMMARY_MIN_CHARS {
        scores.summary = SUMMARY_CAP;
    } else {
        feedback.push(format!(
            "Write a professional summary longer than {SUMMARY_MIN_CHARS} characters"
        ));
    }

    // Experience: per entry, capped.
    scores.experience =
        (resume.experience.0.len() as u32 * POINTS_PER_EXPERIENCE).min(EXPERIENCE_CAP);
    if scores.experience < EXPERIENCE_CAP {
        feedback.push("List more work experience entries with concrete outcomes".to_string());
    }

    // Education: flat credit for any history.
    if !resume.education.0.is_empty() {
        scores.education = EDUCATION_CAP;
    } else {
        feedback.push("Add your education history".to_string());
    }

    // Skills: technical and soft count alike, capped.
    let skill_count = resume.skills.0.technical.len() + resume.skills.0.soft.len();
    scores.skills = (skill_count as u32 * POINTS_PER_SKILL).min(SKILLS_CAP);
    if scores.skills < SKILLS_CAP {
        feedback.push("List more technical and soft skills".to_string());
    }

    // Projects: per entry, capped.
    scores.projects = (resume.projects.0.len() as u32 * POINTS_PER_PROJECT).min(PROJECTS_CAP);
    if scores.projects < PROJECTS_CAP {
        feedback.push("Showcase at least two projects".to_string());
    }

    // Certifications: flat credit for any.
    if !resume.certifications.0.is_empty() {
        scores.certifications = CERTIFICATIONS_CAP;
    } else {
        feedback.push("Add relevant certifications".to_string());
    }

    Assessment {
        overall_score: scores.total().min(100),
        scores,
        feedback,
    }
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{
        Certification, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, SkillSet,
    };
    use chrono::Utc;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn make_resume() -> ResumeRow {
        ResumeRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            template: "modern".to_string(),
            personal_info: Json(PersonalInfo::default()),
            summary: None,
            experience: Json(vec![]),
            education: Json(vec![]),
            skills: Json(SkillSet::default()),
            projects: Json(vec![]),
            certifications: Json(vec![]),
            ats_score: None,
            target_role: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn make_experience(count: usize) -> Vec<ExperienceEntry> {
        (0..count)
            .map(|i| ExperienceEntry {
                company: format!("Company {i}"),
                role: "Engineer".to_string(),
                start_date: Some("2020-01".to_string()),
                end_date: None,
                description: Some("Built things".to_string()),
            })
            .collect()
    }

    fn make_maximal_resume() -> ResumeRow {
        let mut resume = make_resume();
        resume.personal_info = Json(PersonalInfo {
            full_name: Some("Asha Rao".to_string()),
            email: Some("asha@example.com".to_string()),
            phone: Some("+91 98765 43210".to_string()),
            linkedin: Some("linkedin.com/in/asha".to_string()),
            github: None,
            address: None,
        });
        resume.summary = Some(
            "Backend engineer with six years of experience building payment systems at scale"
                .to_string(),
        );
        resume.experience = Json(make_experience(3));
        resume.education = Json(vec![EducationEntry {
            institution: "IIT Bombay".to_string(),
            degree: Some("B.Tech".to_string()),
            field: Some("Computer Science".to_string()),
            year: Some("2018".to_string()),
        }]);
        resume.skills = Json(SkillSet {
            technical: (0..8).map(|i| format!("Skill {i}")).collect(),
            soft: vec!["Communication".to_string(), "Mentoring".to_string()],
        });
        resume.projects = Json(vec![
            ProjectEntry {
                name: "Ledger".to_string(),
                description: None,
                url: None,
                technologies: vec![],
            },
            ProjectEntry {
                name: "Billing".to_string(),
                description: None,
                url: None,
                technologies: vec![],
            },
        ]);
        resume.certifications = Json(vec![Certification {
            name: "AWS Solutions Architect".to_string(),
            issuer: Some("AWS".to_string()),
            year: Some("2023".to_string()),
        }]);
        resume
    }

    #[test]
    fn test_empty_resume_scores_zero() {
        let assessment = assess(&make_resume());
        assert_eq!(assessment.overall_score, 0);
        assert_eq!(assessment.scores, CategoryScores::default());
    }

    #[test]
    fn test_maximal_resume_scores_100_with_no_feedback() {
        let assessment = assess(&make_maximal_resume());
        assert_eq!(assessment.overall_score, 100);
        assert!(
            assessment.feedback.is_empty(),
            "unexpected feedback: {:?}",
            assessment.feedback
        );
    }

    #[test]
    fn test_category_caps_sum_to_100() {
        assert_eq!(
            CONTACT_CAP
                + SUMMARY_CAP
                + EXPERIENCE_CAP
                + EDUCATION_CAP
                + SKILLS_CAP
                + PROJECTS_CAP
                + CERTIFICATIONS_CAP,
            100
        );
    }

    #[test]
    fn test_overall_equals_category_total() {
        let assessment = assess(&make_maximal_resume());
        assert_eq!(assessment.overall_score, assessment.scores.total());
    }

    #[test]
    fn test_contact_subscores_add_up() {
        let mut resume = make_resume();
        resume.personal_info = Json(PersonalInfo {
            email: Some("a@b.c".to_string()),
            ..PersonalInfo::default()
        });
        assert_eq!(assess(&resume).scores.contact, 3);

        resume.personal_info.0.phone = Some("12345".to_string());
        assert_eq!(assess(&resume).scores.contact, 6);

        resume.personal_info.0.github = Some("github.com/a".to_string());
        assert_eq!(assess(&resume).scores.contact, 10);
    }

    #[test]
    fn test_blank_contact_fields_earn_nothing() {
        let mut resume = make_resume();
        resume.personal_info = Json(PersonalInfo {
            email: Some("   ".to_string()),
            phone: Some(String::new()),
            ..PersonalInfo::default()
        });
        assert_eq!(assess(&resume).scores.contact, 0);
    }

    #[test]
    fn test_summary_of_exactly_50_chars_earns_nothing() {
        let mut resume = make_resume();
        resume.summary = Some("x".repeat(SUMMARY_MIN_CHARS));
        assert_eq!(assess(&resume).scores.summary, 0);

        resume.summary = Some("x".repeat(SUMMARY_MIN_CHARS + 1));
        assert_eq!(assess(&resume).scores.summary, SUMMARY_CAP);
    }

    #[test]
    fn test_experience_caps_at_three_entries() {
        let mut resume = make_resume();
        resume.experience = Json(make_experience(2));
        assert_eq!(assess(&resume).scores.experience, 20);

        resume.experience = Json(make_experience(5));
        assert_eq!(assess(&resume).scores.experience, EXPERIENCE_CAP);
    }

    #[test]
    fn test_skills_count_both_kinds_and_cap() {
        let mut resume = make_resume();
        resume.skills = Json(SkillSet {
            technical: vec!["Rust".to_string(), "SQL".to_string()],
            soft: vec!["Communication".to_string()],
        });
        assert_eq!(assess(&resume).scores.skills, 6);

        resume.skills = Json(SkillSet {
            technical: (0..15).map(|i| format!("Skill {i}")).collect(),
            soft: vec![],
        });
        assert_eq!(assess(&resume).scores.skills, SKILLS_CAP);
    }

    #[test]
    fn test_projects_cap_at_two() {
        let mut resume = make_resume();
        resume.projects = Json(vec![ProjectEntry {
            name: "One".to_string(),
            description: None,
            url: None,
            technologies: vec![],
        }]);
        assert_eq!(assess(&resume).scores.projects, 5);

        resume.projects.0.push(ProjectEntry {
            name: "Two".to_string(),
            description: None,
            url: None,
            technologies: vec![],
        });
        resume.projects.0.push(ProjectEntry {
            name: "Three".to_string(),
            description: None,
            url: None,
            technologies: vec![],
        });
        assert_eq!(assess(&resume).scores.projects, PROJECTS_CAP);
    }

    #[test]
    fn test_certifications_credit_is_flat() {
        let mut resume = make_resume();
        resume.certifications = Json(vec![
            Certification {
                name: "Cert A".to_string(),
                issuer: None,
                year: None,
            },
            Certification {
                name: "Cert B".to_string(),
                issuer: None,
                year: None,
            },
        ]);
        assert_eq!(assess(&resume).scores.certifications, CERTIFICATIONS_CAP);
    }

    #[test]
    fn test_empty_resume_gets_feedback_for_every_category() {
        let assessment = assess(&make_resume());
        assert_eq!(assessment.feedback.len(), 7);
    }
}
