//! Authentication provider registry.
//!
//! # Design Rationale
//!
//! Every provider is described exactly once by its [`ProviderDef`] in
//! [`PROVIDER_REGISTRY`]. The set of providers is a closed enum
//! ([`AuthProvider`]) so `match` arms stay exhaustive; string ids only appear
//! at the boundary through [`lookup`] and `FromStr`.
//!
//! # Adding a New Provider
//!
//! 1. Add a variant to [`AuthProvider`] with its `as_str` / `FromStr` arms
//! 2. Add one [`ProviderDef`] entry to [`PROVIDER_REGISTRY`]
//! 3. Add its templates under `templates/auth/<id>/`

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::value_objects::{Framework, SessionStrategy};

// ── Provider ids ──────────────────────────────────────────────────────────────

/// Every authentication provider known to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AuthProvider {
    #[serde(rename = "clerk")]
    Clerk,
    #[serde(rename = "auth.js")]
    AuthJs,
    #[serde(rename = "better-auth")]
    BetterAuth,
    #[serde(rename = "lucia")]
    Lucia,
    #[serde(rename = "supabase")]
    Supabase,
    #[serde(rename = "auth0")]
    Auth0,
    #[serde(rename = "firebase")]
    Firebase,
}

impl AuthProvider {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clerk => "clerk",
            Self::AuthJs => "auth.js",
            Self::BetterAuth => "better-auth",
            Self::Lucia => "lucia",
            Self::Supabase => "supabase",
            Self::Auth0 => "auth0",
            Self::Firebase => "firebase",
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthProvider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clerk" => Ok(Self::Clerk),
            "auth.js" | "authjs" | "next-auth" | "nextauth" => Ok(Self::AuthJs),
            "better-auth" | "betterauth" => Ok(Self::BetterAuth),
            "lucia" => Ok(Self::Lucia),
            "supabase" => Ok(Self::Supabase),
            "auth0" => Ok(Self::Auth0),
            "firebase" => Ok(Self::Firebase),
            _ => Err(DomainError::UnknownProvider { id: s.to_string() }),
        }
    }
}

// ── Package buckets ───────────────────────────────────────────────────────────

/// Key of a package list: one framework, or the catch-all bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageBucket {
    All,
    Only(Framework),
}

/// Package specs grouped by framework, with an `All` fallback.
pub type PackageMap = &'static [(PackageBucket, &'static [&'static str])];

fn select(map: PackageMap, framework: Framework) -> &'static [&'static str] {
    map.iter()
        .find(|(bucket, _)| *bucket == PackageBucket::Only(framework))
        .or_else(|| map.iter().find(|(bucket, _)| *bucket == PackageBucket::All))
        .map(|(_, packages)| *packages)
        .unwrap_or(&[])
}

// ── Provider definitions ──────────────────────────────────────────────────────

/// Static metadata describing one provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderDef {
    pub id: AuthProvider,
    pub display_name: &'static str,
    /// Runtime packages. A framework without its own bucket uses `All`.
    pub packages: PackageMap,
    pub dev_packages: PackageMap,
    /// Keys written to `.env`, in order.
    pub env_variables: &'static [&'static str],
    pub requires_database: bool,
    /// Declaration order is the order shown in error messages.
    pub supported_frameworks: &'static [Framework],
    pub session_strategy: SessionStrategy,
}

impl ProviderDef {
    /// Runtime packages for a framework, falling back to the `All` bucket.
    pub fn packages_for(&self, framework: Framework) -> &'static [&'static str] {
        select(self.packages, framework)
    }

    /// Dev packages for a framework, falling back to the `All` bucket.
    pub fn dev_packages_for(&self, framework: Framework) -> &'static [&'static str] {
        select(self.dev_packages, framework)
    }

    pub fn supports(&self, framework: Framework) -> bool {
        self.supported_frameworks.contains(&framework)
    }

    /// Supported framework ids joined with `", "` in declaration order.
    pub fn supported_list(&self) -> String {
        self.supported_frameworks
            .iter()
            .map(|fw| fw.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Providers whose generated code belongs on the server side.
    pub fn is_backend_oriented(&self) -> bool {
        self.requires_database || self.session_strategy == SessionStrategy::Database
    }
}

/// Single source of truth for all provider capabilities.
pub static PROVIDER_REGISTRY: &[ProviderDef] = &[
    ProviderDef {
        id: AuthProvider::Clerk,
        display_name: "Clerk",
        packages: &[
            (PackageBucket::Only(Framework::Next), &["@clerk/nextjs"]),
            (PackageBucket::Only(Framework::Remix), &["@clerk/remix"]),
            (PackageBucket::All, &["@clerk/clerk-react"]),
        ],
        dev_packages: &[],
        env_variables: &[
            "NEXT_PUBLIC_CLERK_PUBLISHABLE_KEY",
            "CLERK_SECRET_KEY",
            "NEXT_PUBLIC_CLERK_SIGN_IN_URL",
            "NEXT_PUBLIC_CLERK_SIGN_UP_URL",
        ],
        requires_database: false,
        supported_frameworks: &[Framework::Next, Framework::React, Framework::Remix],
        session_strategy: SessionStrategy::Jwt,
    },
    ProviderDef {
        id: AuthProvider::AuthJs,
        display_name: "Auth.js",
        packages: &[
            (PackageBucket::Only(Framework::Next), &["next-auth@beta"]),
            (
                PackageBucket::Only(Framework::SvelteKit),
                &["@auth/sveltekit"],
            ),
            (
                PackageBucket::Only(Framework::SolidStart),
                &["@auth/solid-start"],
            ),
            (PackageBucket::Only(Framework::Express), &["@auth/express"]),
            (PackageBucket::All, &["@auth/core"]),
        ],
        dev_packages: &[],
        env_variables: &["AUTH_SECRET", "AUTH_URL", "DATABASE_URL"],
        requires_database: false,
        supported_frameworks: &[
            Framework::Next,
            Framework::SvelteKit,
            Framework::SolidStart,
            Framework::Express,
        ],
        session_strategy: SessionStrategy::Both,
    },
    ProviderDef {
        id: AuthProvider::BetterAuth,
        display_name: "Better Auth",
        packages: &[(PackageBucket::All, &["better-auth"])],
        dev_packages: &[(PackageBucket::All, &["@better-auth/cli"])],
        env_variables: &["BETTER_AUTH_SECRET", "BETTER_AUTH_URL", "DATABASE_URL"],
        requires_database: true,
        supported_frameworks: &[
            Framework::Next,
            Framework::React,
            Framework::Remix,
            Framework::Vue,
            Framework::Nuxt,
            Framework::SvelteKit,
            Framework::Astro,
            Framework::SolidStart,
            Framework::Express,
            Framework::Hono,
            Framework::Fastify,
        ],
        session_strategy: SessionStrategy::Database,
    },
    ProviderDef {
        id: AuthProvider::Lucia,
        display_name: "Lucia",
        packages: &[(PackageBucket::All, &["lucia", "@oslojs/crypto", "@oslojs/encoding"])],
        dev_packages: &[],
        env_variables: &["SESSION_SECRET", "DATABASE_URL"],
        requires_database: true,
        supported_frameworks: &[
            Framework::Next,
            Framework::SvelteKit,
            Framework::Astro,
            Framework::Nuxt,
            Framework::Express,
            Framework::Hono,
        ],
        session_strategy: SessionStrategy::Database,
    },
    ProviderDef {
        id: AuthProvider::Supabase,
        display_name: "Supabase Auth",
        packages: &[
            (
                PackageBucket::Only(Framework::Next),
                &["@supabase/supabase-js", "@supabase/ssr"],
            ),
            (
                PackageBucket::Only(Framework::SvelteKit),
                &["@supabase/supabase-js", "@supabase/ssr"],
            ),
            (PackageBucket::All, &["@supabase/supabase-js"]),
        ],
        dev_packages: &[(PackageBucket::All, &["supabase"])],
        env_variables: &[
            "NEXT_PUBLIC_SUPABASE_URL",
            "NEXT_PUBLIC_SUPABASE_ANON_KEY",
            "SUPABASE_SERVICE_ROLE_KEY",
        ],
        requires_database: false,
        supported_frameworks: &[
            Framework::Next,
            Framework::React,
            Framework::Remix,
            Framework::Vue,
            Framework::Nuxt,
            Framework::SvelteKit,
            Framework::Astro,
        ],
        session_strategy: SessionStrategy::Jwt,
    },
    ProviderDef {
        id: AuthProvider::Auth0,
        display_name: "Auth0",
        packages: &[
            (PackageBucket::Only(Framework::Next), &["@auth0/nextjs-auth0"]),
            (PackageBucket::Only(Framework::Vue), &["@auth0/auth0-vue"]),
            (
                PackageBucket::Only(Framework::Express),
                &["express-openid-connect"],
            ),
            (PackageBucket::All, &["@auth0/auth0-react"]),
        ],
        dev_packages: &[],
        env_variables: &[
            "AUTH0_SECRET",
            "AUTH0_BASE_URL",
            "AUTH0_ISSUER_BASE_URL",
            "AUTH0_CLIENT_ID",
            "AUTH0_CLIENT_SECRET",
        ],
        requires_database: false,
        supported_frameworks: &[
            Framework::Next,
            Framework::React,
            Framework::Vue,
            Framework::Express,
        ],
        session_strategy: SessionStrategy::Jwt,
    },
    ProviderDef {
        id: AuthProvider::Firebase,
        display_name: "Firebase Auth",
        packages: &[
            (PackageBucket::Only(Framework::Next), &["firebase", "firebase-admin"]),
            (PackageBucket::All, &["firebase"]),
        ],
        dev_packages: &[],
        env_variables: &[
            "NEXT_PUBLIC_FIREBASE_API_KEY",
            "NEXT_PUBLIC_FIREBASE_AUTH_DOMAIN",
            "NEXT_PUBLIC_FIREBASE_PROJECT_ID",
            "FIREBASE_ADMIN_PRIVATE_KEY",
        ],
        requires_database: false,
        supported_frameworks: &[
            Framework::Next,
            Framework::React,
            Framework::Vue,
            Framework::Nuxt,
            Framework::SvelteKit,
        ],
        session_strategy: SessionStrategy::Jwt,
    },
];

// ── Registry lookup API ───────────────────────────────────────────────────────

/// Find the definition for a provider variant.
///
/// Returns `None` only if the variant has no registry entry, which the
/// `assert_registry_integrity` test rules out.
pub fn find_provider(id: AuthProvider) -> Option<&'static ProviderDef> {
    PROVIDER_REGISTRY.iter().find(|def| def.id == id)
}

/// Resolve a string id from the outside world to its definition.
pub fn lookup(id: &str) -> Result<&'static ProviderDef, DomainError> {
    let provider: AuthProvider = id.parse()?;
    find_provider(provider).ok_or_else(|| DomainError::UnknownProvider { id: id.to_string() })
}

/// All registered providers in declaration order.
pub fn all_providers() -> impl Iterator<Item = &'static ProviderDef> {
    PROVIDER_REGISTRY.iter()
}

// ── Registry integrity (checked in tests) ────────────────────────────────────

/// Assert that the registry is internally consistent.
///
/// Panics with a clear message on any violation.
#[doc(hidden)]
pub fn assert_registry_integrity() {
    for (i, def) in PROVIDER_REGISTRY.iter().enumerate() {
        assert!(
            PROVIDER_REGISTRY[..i].iter().all(|other| other.id != def.id),
            "Provider {:?} is registered twice",
            def.id
        );

        assert!(
            !def.supported_frameworks.is_empty(),
            "Provider {:?} supports no frameworks",
            def.id
        );

        // Every supported framework must resolve to a non-empty package list.
        for &fw in def.supported_frameworks {
            assert!(
                !def.packages_for(fw).is_empty(),
                "Provider {:?} declares no packages for {:?} and has no fallback",
                def.id,
                fw
            );
        }

        // Framework buckets must be for frameworks the provider supports.
        for (bucket, _) in def.packages.iter().chain(def.dev_packages.iter()) {
            if let PackageBucket::Only(fw) = bucket {
                assert!(
                    def.supports(*fw),
                    "Provider {:?} has a package bucket for unsupported {:?}",
                    def.id,
                    fw
                );
            }
        }

        if def.requires_database {
            assert!(
                def.env_variables.contains(&"DATABASE_URL"),
                "Provider {:?} requires a database but never writes DATABASE_URL",
                def.id
            );
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
