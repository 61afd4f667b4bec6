//! Template selection: maps the education answer to the prompt layout.
//!
//! This is a decision table, not prose. The literal text each entry points at
//! lives in `analysis::prompts`; this module only decides which pieces apply.

use crate::analysis::form::FormData;
use crate::analysis::prompts;

/// Education answers the questionnaire knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationCategory {
    Abitur,
    Fachabitur,
    Realschule,
    Hauptschule,
    School,
    Bachelor,
    Master,
    /// Anything unrecognized or missing.
    Generic,
}

impl EducationCategory {
    pub fn from_answer(answer: Option<&str>) -> Self {
        match answer.map(str::trim) {
            Some(a) if a.eq_ignore_ascii_case("abitur") => Self::Abitur,
            Some(a) if a.eq_ignore_ascii_case("fachabitur") => Self::Fachabitur,
            Some(a) if a.eq_ignore_ascii_case("realschule") => Self::Realschule,
            Some(a) if a.eq_ignore_ascii_case("hauptschule") => Self::Hauptschule,
            Some(a) if a.eq_ignore_ascii_case("school") || a.eq_ignore_ascii_case("schule") => {
                Self::School
            }
            Some(a) if a.eq_ignore_ascii_case("bachelor") => Self::Bachelor,
            Some(a) if a.eq_ignore_ascii_case("master") => Self::Master,
            _ => Self::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abitur => "abitur",
            Self::Fachabitur => "fachabitur",
            Self::Realschule => "realschule",
            Self::Hauptschule => "hauptschule",
            Self::School => "school",
            Self::Bachelor => "bachelor",
            Self::Master => "master",
            Self::Generic => "generic",
        }
    }
}

/// Which route the recommendations lead with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFocus {
    AcademicFirst,
    /// Fachhochschulen / HAW, dual study and apprenticeships. No universities.
    AppliedSciencesOnly,
    /// Academic routes only through a named second-chance path.
    ApprenticeshipFirst,
    BothPaths,
    Postgraduate,
}

/// One numbered block of the requested answer structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Profile,
    TopCareers,
    UniversityRecommendations,
    AppliedSciencesRecommendations,
    SecondChanceRoute,
    PathComparison,
    PostgraduateOptions,
    NextSteps,
    Alternatives,
    FurtherEducation,
}

/// Everything the renderer needs to know about one education branch.
#[derive(Debug, Clone)]
pub struct TemplateVariant {
    pub category: EducationCategory,
    pub focus: PathFocus,
    pub sections: Vec<Section>,
    pub guidance: &'static str,
    pub route_question: &'static str,
    pub link_templates: Vec<&'static str>,
}

/// Situation answers that make university recommendations relevant on the open branches.
const STUDY_SITUATIONS: &[&str] = &["abitur", "student"];

/// Picks the template variant for a questionnaire.
///
/// `education` decides the branch. `situation` only matters on the branches
/// that show both paths, where it adds the university block.
pub fn select_variant(form: &FormData) -> TemplateVariant {
    let category = EducationCategory::from_answer(form.education_key().as_deref());
    let wants_study = form
        .situation_keys()
        .iter()
        .any(|s| STUDY_SITUATIONS.contains(&s.as_str()));
    variant_for(category, wants_study)
}

pub fn variant_for(category: EducationCategory, wants_study: bool) -> TemplateVariant {
    use Section::*;

    match category {
        EducationCategory::Abitur => TemplateVariant {
            category,
            focus: PathFocus::AcademicFirst,
            sections: vec![
                Profile,
                TopCareers,
                UniversityRecommendations,
                NextSteps,
                Alternatives,
                FurtherEducation,
            ],
            guidance: prompts::GUIDANCE_ABITUR,
            route_question: prompts::ROUTE_ACADEMIC,
            link_templates: vec![
                prompts::LINK_BERUFENET,
                prompts::LINK_HOCHSCHULKOMPASS,
                prompts::LINK_STUDIENWAHL,
            ],
        },
        EducationCategory::Fachabitur => TemplateVariant {
            category,
            focus: PathFocus::AppliedSciencesOnly,
            sections: vec![
                Profile,
                TopCareers,
                AppliedSciencesRecommendations,
                NextSteps,
                Alternatives,
                FurtherEducation,
            ],
            guidance: prompts::GUIDANCE_FACHABITUR,
            route_question: prompts::ROUTE_APPLIED_SCIENCES,
            link_templates: vec![
                prompts::LINK_BERUFENET,
                prompts::LINK_HOCHSCHULKOMPASS_FH,
                prompts::LINK_DUALES_STUDIUM,
            ],
        },
        EducationCategory::Realschule | EducationCategory::Hauptschule => TemplateVariant {
            category,
            focus: PathFocus::ApprenticeshipFirst,
            sections: vec![
                Profile,
                TopCareers,
                SecondChanceRoute,
                NextSteps,
                Alternatives,
                FurtherEducation,
            ],
            guidance: if category == EducationCategory::Realschule {
                prompts::GUIDANCE_REALSCHULE
            } else {
                prompts::GUIDANCE_HAUPTSCHULE
            },
            route_question: prompts::ROUTE_APPRENTICESHIP,
            link_templates: vec![
                prompts::LINK_BERUFENET,
                prompts::LINK_JOBBOERSE_AUSBILDUNG,
                prompts::LINK_PLANET_BERUF,
            ],
        },
        EducationCategory::Bachelor | EducationCategory::Master => TemplateVariant {
            category,
            focus: PathFocus::Postgraduate,
            sections: vec![
                Profile,
                TopCareers,
                PostgraduateOptions,
                NextSteps,
                FurtherEducation,
            ],
            guidance: if category == EducationCategory::Bachelor {
                prompts::GUIDANCE_BACHELOR
            } else {
                prompts::GUIDANCE_MASTER
            },
            route_question: prompts::ROUTE_POSTGRADUATE,
            link_templates: vec![
                prompts::LINK_BERUFENET,
                prompts::LINK_JOBBOERSE,
                prompts::LINK_HOCHSCHULKOMPASS_WEITERFUEHREND,
            ],
        },
        EducationCategory::School | EducationCategory::Generic => {
            let mut sections = vec![Profile, TopCareers, PathComparison];
            if wants_study {
                sections.push(UniversityRecommendations);
            }
            sections.extend([NextSteps, Alternatives, FurtherEducation]);

            TemplateVariant {
                category,
                focus: PathFocus::BothPaths,
                sections,
                guidance: prompts::GUIDANCE_BOTH_PATHS,
                route_question: prompts::ROUTE_BOTH,
                link_templates: vec![
                    prompts::LINK_BERUFENET,
                    prompts::LINK_PLANET_BERUF,
                    prompts::LINK_HOCHSCHULKOMPASS,
                ],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(value: serde_json::Value) -> FormData {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_abitur_leads_with_university() {
        let v = select_variant(&form(json!({ "education": "abitur" })));
        assert_eq!(v.category, EducationCategory::Abitur);
        assert_eq!(v.focus, PathFocus::AcademicFirst);
        assert!(v.sections.contains(&Section::UniversityRecommendations));
    }

    #[test]
    fn test_fachabitur_never_surfaces_universities() {
        let v = select_variant(&form(json!({
            "education": "fachabitur",
            "situation": ["abitur", "student"],
        })));
        assert_eq!(v.category, EducationCategory::Fachabitur);
        assert_eq!(v.focus, PathFocus::AppliedSciencesOnly);
        assert!(!v.sections.contains(&Section::UniversityRecommendations));
        assert!(v.sections.contains(&Section::AppliedSciencesRecommendations));
        assert!(!v.link_templates.contains(&prompts::LINK_HOCHSCHULKOMPASS));
    }

    #[test]
    fn test_realschule_and_hauptschule_are_apprenticeship_first() {
        for answer in ["realschule", "Hauptschule"] {
            let v = select_variant(&form(json!({ "education": answer })));
            assert_eq!(v.focus, PathFocus::ApprenticeshipFirst, "{answer}");
            assert!(v.sections.contains(&Section::SecondChanceRoute));
            assert!(!v.sections.contains(&Section::UniversityRecommendations));
        }
        let real = select_variant(&form(json!({ "education": "realschule" })));
        let haupt = select_variant(&form(json!({ "education": "hauptschule" })));
        assert_ne!(real.guidance, haupt.guidance);
    }

    #[test]
    fn test_graduates_get_postgraduate_paths_only() {
        for answer in ["bachelor", "master"] {
            let v = select_variant(&form(json!({ "education": answer })));
            assert_eq!(v.focus, PathFocus::Postgraduate);
            assert!(v.sections.contains(&Section::PostgraduateOptions));
            assert!(!v.sections.contains(&Section::SecondChanceRoute));
            assert!(!v.sections.contains(&Section::UniversityRecommendations));
        }
    }

    #[test]
    fn test_school_shows_both_and_adds_universities_for_study_situation() {
        let plain = select_variant(&form(json!({ "education": "school" })));
        assert_eq!(plain.focus, PathFocus::BothPaths);
        assert!(plain.sections.contains(&Section::PathComparison));
        assert!(!plain.sections.contains(&Section::UniversityRecommendations));

        let studying = select_variant(&form(json!({
            "education": "schule",
            "situation": ["student"],
        })));
        assert_eq!(studying.category, EducationCategory::School);
        assert!(studying.sections.contains(&Section::UniversityRecommendations));
    }

    #[test]
    fn test_unknown_or_missing_education_falls_back_to_both_paths() {
        for value in [json!({ "education": "Meister" }), json!({})] {
            let v = select_variant(&form(value));
            assert_eq!(v.category, EducationCategory::Generic);
            assert_eq!(v.focus, PathFocus::BothPaths);
        }
    }

    #[test]
    fn test_every_variant_starts_with_profile_and_top_careers() {
        for category in [
            EducationCategory::Abitur,
            EducationCategory::Fachabitur,
            EducationCategory::Realschule,
            EducationCategory::Hauptschule,
            EducationCategory::School,
            EducationCategory::Bachelor,
            EducationCategory::Master,
            EducationCategory::Generic,
        ] {
            let v = variant_for(category, false);
            assert_eq!(&v.sections[..2], &[Section::Profile, Section::TopCareers]);
            assert!(v.sections.contains(&Section::NextSteps), "{}", category.as_str());
        }
    }
}
