//! Domain value objects: the technology dimensions of a stack.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold no provider logic. Everything a provider knows about a stack
//! lives in `providers.rs`. This file defines the types, their string ids,
//! and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Reference it from the relevant `ProviderDef` entries in `providers.rs`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn unknown(field: &'static str, value: &str) -> DomainError {
    DomainError::UnknownValue {
        field,
        value: value.to_string(),
    }
}

// ── Framework ─────────────────────────────────────────────────────────────────

/// The UI (or server runtime) framework the project is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    Next,
    React,
    Remix,
    Vue,
    Nuxt,
    #[serde(rename = "sveltekit")]
    SvelteKit,
    Astro,
    SolidStart,
    Express,
    Hono,
    Fastify,
    #[serde(rename = "nestjs")]
    NestJs,
}

impl Framework {
    pub const ALL: &'static [Framework] = &[
        Self::Next,
        Self::React,
        Self::Remix,
        Self::Vue,
        Self::Nuxt,
        Self::SvelteKit,
        Self::Astro,
        Self::SolidStart,
        Self::Express,
        Self::Hono,
        Self::Fastify,
        Self::NestJs,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::React => "react",
            Self::Remix => "remix",
            Self::Vue => "vue",
            Self::Nuxt => "nuxt",
            Self::SvelteKit => "sveltekit",
            Self::Astro => "astro",
            Self::SolidStart => "solid-start",
            Self::Express => "express",
            Self::Hono => "hono",
            Self::Fastify => "fastify",
            Self::NestJs => "nestjs",
        }
    }

    /// Frameworks that are server runtimes with no UI of their own.
    ///
    /// Generated code for these always lands in the API app.
    pub const fn is_backend_only(self) -> bool {
        matches!(
            self,
            Self::Express | Self::Hono | Self::Fastify | Self::NestJs
        )
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "next" | "nextjs" | "next.js" => Ok(Self::Next),
            "react" | "vite-react" => Ok(Self::React),
            "remix" => Ok(Self::Remix),
            "vue" => Ok(Self::Vue),
            "nuxt" => Ok(Self::Nuxt),
            "sveltekit" | "svelte" => Ok(Self::SvelteKit),
            "astro" => Ok(Self::Astro),
            "solid-start" | "solidstart" | "solid" => Ok(Self::SolidStart),
            "express" => Ok(Self::Express),
            "hono" => Ok(Self::Hono),
            "fastify" => Ok(Self::Fastify),
            "nestjs" | "nest" => Ok(Self::NestJs),
            other => Err(unknown("framework", other)),
        }
    }
}

// ── Backend ───────────────────────────────────────────────────────────────────

/// A separate backend service, if the stack has one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    #[default]
    None,
    /// API routes served by the Next.js app itself.
    NextApi,
    Express,
    Hono,
    Fastify,
    #[serde(rename = "nestjs")]
    NestJs,
}

impl Backend {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::NextApi => "next-api",
            Self::Express => "express",
            Self::Hono => "hono",
            Self::Fastify => "fastify",
            Self::NestJs => "nestjs",
        }
    }

    /// Whether this backend lives in its own app next to the frontend.
    pub const fn is_separate_app(self) -> bool {
        !matches!(self, Self::None | Self::NextApi)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "next-api" | "nextapi" => Ok(Self::NextApi),
            "express" => Ok(Self::Express),
            "hono" => Ok(Self::Hono),
            "fastify" => Ok(Self::Fastify),
            "nestjs" | "nest" => Ok(Self::NestJs),
            other => Err(unknown("backend", other)),
        }
    }
}

// ── Database ──────────────────────────────────────────────────────────────────

/// Database engine (or hosted flavour of one).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    #[default]
    None,
    Postgres,
    Mysql,
    Sqlite,
    Mongodb,
    Neon,
    Planetscale,
    Turso,
    Supabase,
}

/// SQL dialect used to pick raw migration templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlDialect {
    Postgres,
    Mysql,
    Sqlite,
}

impl SqlDialect {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }

    /// Node driver imported by `scripts/setup-auth-db.ts` for this dialect.
    ///
    /// Hosted engines share their dialect's script, so they share its driver.
    pub const fn driver_package(&self) -> &'static str {
        match self {
            Self::Postgres => "pg",
            Self::Mysql => "mysql2",
            Self::Sqlite => "better-sqlite3",
        }
    }
}

impl Database {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
            Self::Mongodb => "mongodb",
            Self::Neon => "neon",
            Self::Planetscale => "planetscale",
            Self::Turso => "turso",
            Self::Supabase => "supabase",
        }
    }

    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// The SQL dialect for engines we ship raw migrations for.
    ///
    /// Supabase is Postgres underneath but manages its own auth schema, so it
    /// is deliberately absent here.
    pub const fn sql_dialect(self) -> Option<SqlDialect> {
        match self {
            Self::Postgres | Self::Neon => Some(SqlDialect::Postgres),
            Self::Mysql | Self::Planetscale => Some(SqlDialect::Mysql),
            Self::Sqlite | Self::Turso => Some(SqlDialect::Sqlite),
            Self::None | Self::Mongodb | Self::Supabase => None,
        }
    }

}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Database {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mysql" => Ok(Self::Mysql),
            "sqlite" => Ok(Self::Sqlite),
            "mongodb" | "mongo" => Ok(Self::Mongodb),
            "neon" => Ok(Self::Neon),
            "planetscale" => Ok(Self::Planetscale),
            "turso" | "libsql" => Ok(Self::Turso),
            "supabase" => Ok(Self::Supabase),
            other => Err(unknown("database", other)),
        }
    }
}

// ── Orm ───────────────────────────────────────────────────────────────────────

/// Data-access layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orm {
    #[default]
    None,
    Prisma,
    Drizzle,
    Mongoose,
}

impl Orm {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Prisma => "prisma",
            Self::Drizzle => "drizzle",
            Self::Mongoose => "mongoose",
        }
    }

    /// Conventional location of a `model { }` schema file, relative to the
    /// app directory. Only Prisma uses one.
    pub const fn schema_path(self) -> Option<&'static str> {
        match self {
            Self::Prisma => Some("prisma/schema.prisma"),
            Self::None | Self::Drizzle | Self::Mongoose => None,
        }
    }
}

impl fmt::Display for Orm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orm {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "prisma" => Ok(Self::Prisma),
            "drizzle" => Ok(Self::Drizzle),
            "mongoose" => Ok(Self::Mongoose),
            other => Err(unknown("orm", other)),
        }
    }
}

// ── Styling ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Styling {
    #[default]
    Tailwind,
    CssModules,
    Sass,
    StyledComponents,
    None,
}

impl Styling {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tailwind => "tailwind",
            Self::CssModules => "css-modules",
            Self::Sass => "sass",
            Self::StyledComponents => "styled-components",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Styling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Styling {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tailwind" | "tailwindcss" => Ok(Self::Tailwind),
            "css-modules" | "css" => Ok(Self::CssModules),
            "sass" | "scss" => Ok(Self::Sass),
            "styled-components" => Ok(Self::StyledComponents),
            "none" | "" => Ok(Self::None),
            other => Err(unknown("styling", other)),
        }
    }
}

// ── PackageManager ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Bun => "bun",
        }
    }

    /// Arguments that precede the package list, e.g. `["add", "-D"]`.
    pub fn install_args(self, dev: bool) -> Vec<&'static str> {
        let mut args = match self {
            Self::Npm => vec!["install"],
            Self::Pnpm | Self::Yarn | Self::Bun => vec!["add"],
        };
        if dev {
            args.push(match self {
                Self::Npm => "--save-dev",
                Self::Pnpm | Self::Yarn | Self::Bun => "-D",
            });
        }
        args
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "pnpm" => Ok(Self::Pnpm),
            "yarn" => Ok(Self::Yarn),
            "bun" => Ok(Self::Bun),
            other => Err(unknown("package manager", other)),
        }
    }
}

// ── SessionStrategy ───────────────────────────────────────────────────────────

/// Where a provider keeps session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStrategy {
    Jwt,
    Database,
    Both,
}

impl SessionStrategy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Jwt => "jwt",
            Self::Database => "database",
            Self::Both => "both",
        }
    }

    /// Whether sessions can be persisted in a database table.
    pub const fn uses_database(self) -> bool {
        matches!(self, Self::Database | Self::Both)
    }
}

impl fmt::Display for SessionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_round_trips_through_its_id() {
        for fw in Framework::ALL {
            assert_eq!(fw.as_str().parse::<Framework>().unwrap(), *fw);
        }
    }

    #[test]
    fn framework_from_str_accepts_aliases() {
        assert_eq!("nextjs".parse::<Framework>().unwrap(), Framework::Next);
        assert_eq!("Next.js".parse::<Framework>().unwrap(), Framework::Next);
        assert_eq!("svelte".parse::<Framework>().unwrap(), Framework::SvelteKit);
        assert_eq!("nest".parse::<Framework>().unwrap(), Framework::NestJs);
    }

    #[test]
    fn unknown_framework_names_field_and_value() {
        let err = "angular".parse::<Framework>().unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownValue {
                field: "framework",
                value: "angular".into()
            }
        );
    }

    #[test]
    fn backend_only_frameworks() {
        assert!(Framework::Express.is_backend_only());
        assert!(Framework::Hono.is_backend_only());
        assert!(!Framework::Next.is_backend_only());
        assert!(!Framework::Remix.is_backend_only());
    }

    #[test]
    fn separate_backend_apps() {
        assert!(!Backend::None.is_separate_app());
        assert!(!Backend::NextApi.is_separate_app());
        assert!(Backend::Express.is_separate_app());
        assert!(Backend::NestJs.is_separate_app());
    }

    #[test]
    fn sql_dialects_group_hosted_engines() {
        assert_eq!(Database::Neon.sql_dialect(), Some(SqlDialect::Postgres));
        assert_eq!(Database::Planetscale.sql_dialect(), Some(SqlDialect::Mysql));
        assert_eq!(Database::Turso.sql_dialect(), Some(SqlDialect::Sqlite));
        assert_eq!(Database::Mongodb.sql_dialect(), None);
        assert_eq!(Database::None.sql_dialect(), None);
    }

    #[test]
    fn database_parses_common_spellings() {
        assert_eq!("postgresql".parse::<Database>().unwrap(), Database::Postgres);
        assert_eq!("mongo".parse::<Database>().unwrap(), Database::Mongodb);
        assert_eq!("none".parse::<Database>().unwrap(), Database::None);
        assert!("oracle".parse::<Database>().is_err());
    }

    #[test]
    fn only_prisma_has_a_schema_file() {
        assert_eq!(Orm::Prisma.schema_path(), Some("prisma/schema.prisma"));
        assert_eq!(Orm::Drizzle.schema_path(), None);
        assert_eq!(Orm::None.schema_path(), None);
    }

    #[test]
    fn package_manager_install_args() {
        assert_eq!(PackageManager::Npm.install_args(false), vec!["install"]);
        assert_eq!(
            PackageManager::Npm.install_args(true),
            vec!["install", "--save-dev"]
        );
        assert_eq!(PackageManager::Pnpm.install_args(true), vec!["add", "-D"]);
        assert_eq!(PackageManager::Bun.install_args(false), vec!["add"]);
    }

    #[test]
    fn session_strategy_database_usage() {
        assert!(SessionStrategy::Database.uses_database());
        assert!(SessionStrategy::Both.uses_database());
        assert!(!SessionStrategy::Jwt.uses_database());
    }
}
