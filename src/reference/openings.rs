use crate::models::job::JobPosition;

struct Opening {
    title: &'static str,
    department: &'static str,
    location: &'static str,
    employment_type: &'static str,
    requirements: &'static [&'static str],
}

const CURRENT_OPENINGS: &[Opening] = &[
    Opening {
        title: "Administrative Officer",
        department: "Administration",
        location: "Dubai, UAE",
        employment_type: "Full-time",
        requirements: &[
            "Bachelor's degree in Business Administration or related field",
            "Minimum 3 years of administrative experience",
            "Excellent communication skills in English",
            "Knowledge of Arabic is a plus",
        ],
    },
    Opening {
        title: "Visa Processing Officer",
        department: "Consular Services",
        location: "Dubai, UAE",
        employment_type: "Full-time",
        requirements: &[
            "Bachelor's degree in relevant field",
            "2+ years experience in visa processing",
            "Strong attention to detail",
            "Proficiency in MS Office Suite",
        ],
    },
    Opening {
        title: "IT Support Specialist",
        department: "Information Technology",
        location: "Dubai, UAE",
        employment_type: "Full-time",
        requirements: &[
            "Bachelor's degree in IT or Computer Science",
            "3+ years of IT support experience",
            "Knowledge of network administration",
            "Experience with help desk software",
        ],
    },
];

impl From<&Opening> for JobPosition {
    fn from(o: &Opening) -> Self {
        JobPosition {
            title: o.title.to_string(),
            department: o.department.to_string(),
            location: o.location.to_string(),
            employment_type: o.employment_type.to_string(),
            requirements: o.requirements.iter().map(|r| r.to_string()).collect(),
        }
    }
}

pub fn current_openings() -> Vec<JobPosition> {
    CURRENT_OPENINGS.iter().map(JobPosition::from).collect()
}

/// Finds an opening by title, ignoring case and surrounding whitespace.
pub fn find_opening(title: &str) -> Option<JobPosition> {
    let wanted = title.trim();
    CURRENT_OPENINGS
        .iter()
        .find(|o| o.title.eq_ignore_ascii_case(wanted))
        .map(JobPosition::from)
}
