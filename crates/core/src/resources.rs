//! Compiled catalogue of framework resource pages (`/resources/{framework}`).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceLink {
    pub label: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub slug: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    pub links: &'static [ResourceLink],
}

pub const CATALOGUE: &[Resource] = &[
    Resource {
        slug: "nextjs",
        name: "Next.js",
        summary: "App Router, server components and data fetching patterns.",
        links: &[
            ResourceLink {
                label: "Documentation",
                url: "https://nextjs.org/docs",
            },
            ResourceLink {
                label: "Learn course",
                url: "https://nextjs.org/learn",
            },
        ],
    },
    Resource {
        slug: "trpc",
        name: "tRPC",
        summary: "End-to-end typed APIs without a schema layer.",
        links: &[ResourceLink {
            label: "Documentation",
            url: "https://trpc.io/docs",
        }],
    },
    Resource {
        slug: "prisma",
        name: "Prisma",
        summary: "Type-safe database access and migrations.",
        links: &[ResourceLink {
            label: "Documentation",
            url: "https://www.prisma.io/docs",
        }],
    },
    Resource {
        slug: "tailwindcss",
        name: "Tailwind CSS",
        summary: "Utility-first styling for the whole site.",
        links: &[ResourceLink {
            label: "Documentation",
            url: "https://tailwindcss.com/docs",
        }],
    },
];

/// Look up a catalogue entry by slug, ignoring case.
pub fn find(framework: &str) -> Option<&'static Resource> {
    CATALOGUE
        .iter()
        .find(|r| r.slug.eq_ignore_ascii_case(framework))
}
