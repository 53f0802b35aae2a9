//! Static content for the marketing pages.
//!
//! Skills, services, and pricing are presentational data with no backing
//! service; they change on deploy, so they live here as typed constants and
//! get serialized straight into template context.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Skill {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
    pub price: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PricingTier {
    pub name: &'static str,
    pub offerings: Vec<Service>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub stack: &'static str,
}

pub fn skills() -> Vec<Skill> {
    vec![
        Skill {
            title: "Frontend Development",
            description: "Responsive, accessible interfaces with modern tooling.",
        },
        Skill {
            title: "Backend Development",
            description: "APIs and services built for correctness and throughput.",
        },
        Skill {
            title: "Database Design",
            description: "Schema design, migrations, and query tuning.",
        },
        Skill {
            title: "Mobile Development",
            description: "Cross-platform apps for iOS and Android.",
        },
        Skill {
            title: "Web Applications",
            description: "End-to-end product builds, from idea to deploy.",
        },
        Skill {
            title: "UI/UX Design",
            description: "Interfaces people can actually use.",
        },
        Skill {
            title: "DevOps & Deployment",
            description: "CI/CD pipelines, containers, and observability.",
        },
        Skill {
            title: "Security & Testing",
            description: "Hardening, auditing, and automated test suites.",
        },
    ]
}

pub fn services() -> Vec<Service> {
    vec![
        Service {
            title: "Custom Desktop App Development",
            description: "Native desktop tools tailored to your workflow.",
            price: "Starting at $40",
        },
        Service {
            title: "Custom Full-Stack Desktop App Development",
            description: "Desktop frontends backed by a hosted service.",
            price: "Starting at $80",
        },
        Service {
            title: "Full-Stack Desktop App with Payment Integration",
            description: "Everything above plus checkout and billing.",
            price: "Starting at $100",
        },
    ]
}

pub fn projects() -> Vec<Project> {
    vec![
        Project {
            title: "Inventory Dashboard",
            description: "Real-time stock tracking for a regional retailer, \
                          with barcode intake and low-stock alerts.",
            stack: "Desktop app + REST backend",
        },
        Project {
            title: "Booking Platform",
            description: "Appointment scheduling with calendar sync and \
                          automated reminder emails.",
            stack: "Web app + payments",
        },
        Project {
            title: "Field Report Tool",
            description: "Offline-first data capture for site inspectors, \
                          syncing when a connection returns.",
            stack: "Cross-platform mobile",
        },
    ]
}

pub fn pricing_tiers() -> Vec<PricingTier> {
    vec![
        PricingTier {
            name: "Basic",
            offerings: vec![
                Service {
                    title: "Simple Landing Page",
                    description: "A single polished page with contact form.",
                    price: "$299",
                },
                Service {
                    title: "WordPress Website",
                    description: "A themed multi-page site you can edit yourself.",
                    price: "$399",
                },
                Service {
                    title: "API Integration",
                    description: "Wire an existing site to a third-party API.",
                    price: "$199",
                },
            ],
        },
        PricingTier {
            name: "Premium",
            offerings: vec![
                Service {
                    title: "Enterprise Application",
                    description: "Multi-user business application with admin tooling.",
                    price: "$1,499",
                },
                Service {
                    title: "Mobile App (iOS/Android)",
                    description: "A cross-platform app shipped to both stores.",
                    price: "$1,299",
                },
                Service {
                    title: "Full-Stack Solution",
                    description: "Web app, API, database, and deployment.",
                    price: "$1,899",
                },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_sets_are_nonempty() {
        assert!(!skills().is_empty());
        assert!(!services().is_empty());
        assert!(!projects().is_empty());
        assert_eq!(pricing_tiers().len(), 2);
    }
}
