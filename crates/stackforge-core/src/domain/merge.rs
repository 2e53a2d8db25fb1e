//! Idempotent merge rules for files that may already exist.
//!
//! Everything here is a pure `&str -> String` transformation. Reading and
//! writing the files is the job of `FileMergeEngine` in the application layer.
//!
//! | Artifact | Detection | Present | Absent |
//! |---|---|---|---|
//! | `.env` | section heading | no-op | append block |
//! | `.env.example` | section heading | no-op | append block with values replaced |
//! | `package.json` | n/a | overwrite the setup scripts | create `scripts`, add them |
//! | Prisma schema | `model Account` / `model Session` | no-op | drop one-line `model User`, append |

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{context::GenerationContext, providers::ProviderDef};

/// Prefix of every generated env section. Its presence means "already merged".
pub const ENV_MARKER: &str = "# Authentication";

/// Value written to `.env.example` in place of anything real.
pub const EXAMPLE_PLACEHOLDER: &str = "your-value-here";

/// Scripts added to `package.json` when the raw-SQL setup is generated.
pub const SETUP_SCRIPTS: &[(&str, &str)] = &[
    ("db:setup", "tsx scripts/setup-auth-db.ts"),
    ("db:setup:bun", "bun run scripts/setup-auth-db.ts"),
];

/// Either model means the auth models were merged before.
pub const SCHEMA_SENTINELS: &[&str] = &["model Account", "model Session"];

/// Only a `model User { ... }` that starts a line and closes on it is
/// matched. Multi-line definitions are left in place and the generated one
/// is appended anyway.
static SINGLE_LINE_USER_MODEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^model User \{[^}\n]*\}\n?").expect("valid regex"));

/// Auth models appended to a Prisma schema.
pub const PRISMA_AUTH_MODELS: &str = r#"model User {
  id            String    @id @default(cuid())
  name          String?
  email         String?   @unique
  emailVerified DateTime?
  image         String?
  accounts      Account[]
  sessions      Session[]
  createdAt     DateTime  @default(now())
  updatedAt     DateTime  @updatedAt
}

model Account {
  id                String  @id @default(cuid())
  userId            String
  type              String
  provider          String
  providerAccountId String
  refresh_token     String?
  access_token      String?
  expires_at        Int?
  token_type        String?
  scope             String?
  id_token          String?
  session_state     String?
  user              User    @relation(fields: [userId], references: [id], onDelete: Cascade)

  @@unique([provider, providerAccountId])
}

model Session {
  id           String   @id @default(cuid())
  sessionToken String   @unique
  userId       String
  expires      DateTime
  user         User     @relation(fields: [userId], references: [id], onDelete: Cascade)
}

model VerificationToken {
  identifier String
  token      String   @unique
  expires    DateTime

  @@unique([identifier, token])
}
"#;

// ── Types ─────────────────────────────────────────────────────────────────────

/// A file to merge into, the block to merge, and how to recognise it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeTarget {
    pub path: PathBuf,
    pub block: String,
    pub marker: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// New file content.
    Applied(String),
    /// The marker was found; the file must not be touched.
    AlreadyPresent,
}

/// Content that cannot be merged as-is.
#[derive(Debug, Error)]
pub enum MergeFailure {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected {0} to be a JSON object")]
    NotAnObject(&'static str),
}

// ── Env files ─────────────────────────────────────────────────────────────────

pub fn env_heading(provider: &ProviderDef) -> String {
    format!("{ENV_MARKER} ({})", provider.display_name)
}

/// Heading plus one `KEY=value` line per provider variable, in order.
pub fn env_block(ctx: &GenerationContext) -> String {
    let provider = ctx.provider();
    let mut block = env_heading(provider);
    block.push('\n');
    for key in provider.env_variables {
        block.push_str(key);
        block.push('=');
        block.push_str(&ctx.env_value(key));
        block.push('\n');
    }
    block
}

/// Rewrite every real value to [`EXAMPLE_PLACEHOLDER`].
///
/// Values that already look like placeholders (`your-...`) or point at
/// `http://localhost` are kept. Comments and key order are preserved.
pub fn example_block(block: &str) -> String {
    block
        .lines()
        .map(|line| match line.split_once('=') {
            Some((key, value))
                if !line.trim_start().starts_with('#')
                    && !value.contains("your-")
                    && !value.contains("http://localhost") =>
            {
                format!("{key}={EXAMPLE_PLACEHOLDER}\n")
            }
            _ => format!("{line}\n"),
        })
        .collect()
}

/// Append `block` unless `marker` already occurs in `existing`.
pub fn merge_block(existing: &str, block: &str, marker: &str) -> MergeOutcome {
    if existing.contains(marker) {
        return MergeOutcome::AlreadyPresent;
    }
    MergeOutcome::Applied(append_section(existing, block))
}

fn append_section(existing: &str, block: &str) -> String {
    let mut out = existing.to_string();
    if !out.is_empty() {
        if !out.ends_with('\n') {
            out.push('\n');
        }
        if !out.ends_with("\n\n") {
            out.push('\n');
        }
    }
    out.push_str(block);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

// ── package.json ──────────────────────────────────────────────────────────────

/// Set the setup scripts in a `package.json` document.
///
/// Existing keys keep their order. The setup scripts are overwritten if they
/// exist, so a re-run yields the same document.
pub fn merge_package_scripts(existing: &str) -> Result<String, MergeFailure> {
    let mut doc: Value = serde_json::from_str(existing)?;
    let root = doc
        .as_object_mut()
        .ok_or(MergeFailure::NotAnObject("package.json"))?;

    let scripts = root
        .entry("scripts")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or(MergeFailure::NotAnObject("\"scripts\""))?;

    for (name, command) in SETUP_SCRIPTS {
        scripts.insert((*name).to_string(), Value::String((*command).to_string()));
    }

    let mut out = serde_json::to_string_pretty(&doc)?;
    out.push('\n');
    Ok(out)
}

// ── Prisma schema ─────────────────────────────────────────────────────────────

/// Fold the auth models into a schema.
///
/// Skipped entirely when either sentinel model exists.
pub fn merge_schema(existing: &str, models: &str) -> MergeOutcome {
    if SCHEMA_SENTINELS.iter().any(|s| existing.contains(s)) {
        return MergeOutcome::AlreadyPresent;
    }
    let stripped = SINGLE_LINE_USER_MODEL.replace_all(existing, "");
    MergeOutcome::Applied(append_section(&stripped, models))
}
