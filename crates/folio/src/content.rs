//! The portfolio document.
//!
//! Plain records built at compile time and never mutated. Rendering only
//! iterates over them.

use folio_nav::{SectionList, SectionListError};

/// Section ids and nav labels, in navigation and content order.
pub const SECTIONS: [(&str, &str); 6] = [
    ("about", "About"),
    ("experience", "Experience"),
    ("education", "Education"),
    ("projects", "Projects"),
    ("skills", "Skills"),
    ("contact", "Contact"),
];

pub fn sections() -> Result<SectionList, SectionListError> {
    SectionList::from_pairs(SECTIONS)
}

#[derive(Debug)]
pub struct Profile {
    pub name: &'static str,
    pub title: &'static str,
    pub location: &'static str,
    pub summary: &'static [&'static str],
}

#[derive(Debug)]
pub struct Experience {
    pub role: &'static str,
    pub company: &'static str,
    pub period: &'static str,
    pub highlights: &'static [&'static str],
}

#[derive(Debug)]
pub struct Education {
    pub degree: &'static str,
    pub school: &'static str,
    pub period: &'static str,
    pub detail: &'static str,
}

#[derive(Debug)]
pub struct Project {
    pub name: &'static str,
    pub blurb: &'static str,
    pub tags: &'static [&'static str],
}

#[derive(Debug)]
pub struct SkillCategory {
    pub name: &'static str,
    pub skills: &'static [&'static str],
}

#[derive(Debug)]
pub struct Contact {
    pub email: &'static str,
    pub profile_url: &'static str,
    pub note: &'static str,
}

#[derive(Debug)]
pub struct Portfolio {
    pub profile: Profile,
    pub experience: &'static [Experience],
    pub education: &'static [Education],
    pub projects: &'static [Project],
    pub skills: &'static [SkillCategory],
    pub contact: Contact,
}

pub static PORTFOLIO: Portfolio = Portfolio {
    profile: Profile {
        name: "Sam Okafor",
        title: "Backend & Infrastructure Engineer",
        location: "Lisbon, Portugal",
        summary: &[
            "I build the quiet parts of software: queues that drain, services that \
             restart cleanly, and dashboards that tell the truth at three in the morning.",
            "Most of my work sits between product teams and the machines they run on. \
             I like small, well-tested tools, boring deployments, and writing things down.",
        ],
    },
    experience: &[
        Experience {
            role: "Senior Platform Engineer",
            company: "Tidewater Logistics",
            period: "2021 - present",
            highlights: &[
                "Led the move from a cron-driven batch pipeline to an event-driven ingest \
                 service handling 40k shipments per hour.",
                "Cut median deploy time from 25 minutes to 4 by splitting the monolith's \
                 build graph and caching artifacts per crate.",
                "Run the on-call rotation handbook and the quarterly incident reviews.",
            ],
        },
        Experience {
            role: "Software Engineer",
            company: "Brightline Health",
            period: "2018 - 2021",
            highlights: &[
                "Built the appointment-reminder service (SMS and email) used by 300 clinics.",
                "Replaced ad-hoc scripts with a typed migration tool for the patient database.",
            ],
        },
        Experience {
            role: "Junior Developer",
            company: "Oficina Digital",
            period: "2016 - 2018",
            highlights: &[
                "Maintained e-commerce storefronts and their payment integrations.",
                "Introduced automated browser tests to the agency's release checklist.",
            ],
        },
    ],
    education: &[
        Education {
            degree: "MSc Computer Science",
            school: "University of Lisbon",
            period: "2014 - 2016",
            detail: "Thesis on adaptive timeouts for replicated state machines.",
        },
        Education {
            degree: "BSc Software Engineering",
            school: "University of Lagos",
            period: "2010 - 2014",
            detail: "Graduated with honours; teaching assistant for Operating Systems.",
        },
    ],
    projects: &[
        Project {
            name: "tallyho",
            blurb: "A rate limiter library with sliding-window and token-bucket policies, \
                    shared across services through a small gRPC sidecar.",
            tags: &["Rust", "gRPC", "Redis"],
        },
        Project {
            name: "logfold",
            blurb: "Command-line tool that folds repetitive log lines into counted \
                    templates so incident timelines fit on one screen.",
            tags: &["Rust", "CLI", "Regex"],
        },
        Project {
            name: "porchlight",
            blurb: "Self-hosted status page that reads health checks from Prometheus and \
                    publishes a static site on every state change.",
            tags: &["Go", "Prometheus", "Static sites"],
        },
    ],
    skills: &[
        SkillCategory {
            name: "Languages",
            skills: &["Rust", "Go", "Python", "TypeScript", "SQL"],
        },
        SkillCategory {
            name: "Infrastructure",
            skills: &["Kubernetes", "Terraform", "PostgreSQL", "Kafka", "Nginx"],
        },
        SkillCategory {
            name: "Practices",
            skills: &["Incident response", "Observability", "Code review", "Technical writing"],
        },
    ],
    contact: Contact {
        email: "sam.okafor@example.com",
        profile_url: "https://www.linkedin.com/in/sam-okafor-example",
        note: "Open to platform and reliability roles. The fastest way to reach me is email.",
    },
};
