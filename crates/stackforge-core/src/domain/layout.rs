//! Single-app vs monorepo layout classification.
//!
//! The layout is computed once per run and threaded through every step, so
//! the installer and the template copier always agree on where code lands.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{project::ProjectConfig, providers::ProviderDef};

pub const API_APP_DIR: &str = "apps/api";
pub const WEB_APP_DIR: &str = "apps/web";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub is_monorepo: bool,
    /// Directory the package manager runs in.
    pub install_target: PathBuf,
    /// Directory rendered templates are written into.
    pub template_destination: PathBuf,
}

/// Decide where packages and generated files go.
///
/// Server-side code goes to `apps/api` when the provider is backend-oriented
/// or the framework itself is a server runtime, provided there is an API app
/// to put it in (a monorepo, or a backend-only framework). Other monorepos
/// use `apps/web`. Single apps use the project root.
pub fn classify_layout(config: &ProjectConfig, provider: &ProviderDef) -> Layout {
    let is_monorepo = config.is_monorepo();
    let backend_only = config.framework().is_backend_only();
    let root = config.path();

    let target = if (provider.is_backend_oriented() || backend_only) && (is_monorepo || backend_only)
    {
        root.join(API_APP_DIR)
    } else if is_monorepo {
        root.join(WEB_APP_DIR)
    } else {
        root.to_path_buf()
    };

    Layout {
        is_monorepo,
        template_destination: target.clone(),
        install_target: target,
    }
}
