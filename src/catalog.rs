//! The fixed catalog of template roots.
//!
//! Every root is described by a static [`TemplateDescriptor`] that carries
//! the defaults generation needs: region, database, implied features and
//! resource sizing. Nothing downstream inspects the identifier text itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REGION;
use crate::error::{Error, Result};

/// Cloud a template deploys to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cloud {
    Aws,
    Gcp,
    Azure,
}

impl Cloud {
    /// Short lower-case slug exposed to templates.
    pub fn slug(self) -> &'static str {
        match self {
            Cloud::Aws => "aws",
            Cloud::Gcp => "gcp",
            Cloud::Azure => "azure",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Cloud::Aws => "AWS",
            Cloud::Gcp => "Google Cloud",
            Cloud::Azure => "Azure",
        }
    }
}

/// Database engines a generated project can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Database {
    PostgreSql,
    MySql,
    SqlServer,
}

impl Database {
    pub const ALL: [Database; 3] = [Database::PostgreSql, Database::MySql, Database::SqlServer];

    pub fn as_str(self) -> &'static str {
        match self {
            Database::PostgreSql => "PostgreSQL",
            Database::MySql => "MySQL",
            Database::SqlServer => "SqlServer",
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Database {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Database::ALL
            .into_iter()
            .find(|db| db.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::ValidationError(format!(
                    "unsupported database '{s}' (expected PostgreSQL, MySQL or SqlServer)"
                ))
            })
    }
}

/// Optional capabilities a generated project can include.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub cache: bool,
    pub storage: bool,
    pub mail: bool,
    pub queue: bool,
    pub jobs: bool,
    pub worker: bool,
}

impl Features {
    pub const NONE: Features = Features {
        cache: false,
        storage: false,
        mail: false,
        queue: false,
        jobs: false,
        worker: false,
    };

    pub const CACHE: Features = Features {
        cache: true,
        ..Features::NONE
    };

    pub const ALL: Features = Features {
        cache: true,
        storage: true,
        mail: true,
        queue: true,
        jobs: true,
        worker: true,
    };

    /// Logical OR of both sets. Never turns a feature off.
    pub fn union(self, other: Features) -> Features {
        Features {
            cache: self.cache || other.cache,
            storage: self.storage || other.storage,
            mail: self.mail || other.mail,
            queue: self.queue || other.queue,
            jobs: self.jobs || other.jobs,
            worker: self.worker || other.worker,
        }
    }

    pub fn any(self) -> bool {
        self != Features::NONE
    }

    /// Slugs of the enabled features, in a stable order.
    pub fn enabled(self) -> Vec<&'static str> {
        [
            (self.cache, "cache"),
            (self.storage, "storage"),
            (self.mail, "mail"),
            (self.queue, "queue"),
            (self.jobs, "jobs"),
            (self.worker, "worker"),
        ]
        .into_iter()
        .filter_map(|(on, slug)| on.then_some(slug))
        .collect()
    }

    /// Parses a comma-separated service list such as `cache,queue` or `all`.
    ///
    /// `database` is accepted for compatibility; the database engine is always
    /// resolved, so it toggles nothing.
    pub fn from_services(list: &str) -> Result<Features> {
        let mut features = Features::NONE;
        for service in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match service.to_ascii_lowercase().as_str() {
                "all" => features = Features::ALL,
                "database" => {}
                "cache" => features.cache = true,
                "storage" => features.storage = true,
                "mail" => features.mail = true,
                "queue" => features.queue = true,
                "jobs" => features.jobs = true,
                "worker" => features.worker = true,
                other => {
                    return Err(Error::ValidationError(format!(
                        "unknown service '{other}' (expected database, cache, storage, mail, queue, jobs, worker or all)"
                    )))
                }
            }
        }
        Ok(features)
    }
}

/// Identifier of a template root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateId {
    DotnetWebappAws,
    DotnetWebappGcp,
    DotnetWebappAzure,
    AspireWebappAws,
    AspireWebappGcp,
    AspireWebappAzure,
    AspireFullstackAws,
    AspireFullstackGcp,
    AspireFullstackAzure,
}

/// Static description of one template root.
#[derive(Debug)]
pub struct TemplateDescriptor {
    pub id: TemplateId,
    pub name: &'static str,
    pub cloud: Cloud,
    pub service: &'static str,
    pub description: &'static str,
    /// Top-level directory of the asset tree in the template store.
    pub asset_root: &'static str,
    pub default_region: &'static str,
    pub default_database: Database,
    /// Features the template always includes.
    pub implied: Features,
    pub default_cpu: &'static str,
    pub default_memory: &'static str,
}

const FULLSTACK: Features = Features::ALL;

static CATALOG: [TemplateDescriptor; 9] = [
    TemplateDescriptor {
        id: TemplateId::DotnetWebappAws,
        name: "dotnet-webapp-aws",
        cloud: Cloud::Aws,
        service: "App Runner",
        description: ".NET web application deployed to AWS App Runner with ECR",
        asset_root: "aws",
        default_region: DEFAULT_REGION,
        default_database: Database::PostgreSql,
        implied: Features::NONE,
        default_cpu: "1024",
        default_memory: "2048",
    },
    TemplateDescriptor {
        id: TemplateId::DotnetWebappGcp,
        name: "dotnet-webapp-gcp",
        cloud: Cloud::Gcp,
        service: "Cloud Run",
        description: ".NET web application deployed to Google Cloud Run with Artifact Registry",
        asset_root: "gcp",
        default_region: "us-central1",
        default_database: Database::PostgreSql,
        implied: Features::NONE,
        default_cpu: "1000m",
        default_memory: "2Gi",
    },
    TemplateDescriptor {
        id: TemplateId::DotnetWebappAzure,
        name: "dotnet-webapp-azure",
        cloud: Cloud::Azure,
        service: "Container Apps",
        description: ".NET web application deployed to Azure Container Apps with ACR",
        asset_root: "azure",
        default_region: "eastus",
        default_database: Database::PostgreSql,
        implied: Features::NONE,
        default_cpu: "1.0",
        default_memory: "2.0Gi",
    },
    TemplateDescriptor {
        id: TemplateId::AspireWebappAws,
        name: "aspire-webapp-aws",
        cloud: Cloud::Aws,
        service: "ECS Fargate",
        description: ".NET Aspire web application with Redis cache, deployed to AWS",
        asset_root: "aspire",
        default_region: DEFAULT_REGION,
        default_database: Database::PostgreSql,
        implied: Features::CACHE,
        default_cpu: "1024",
        default_memory: "2048",
    },
    TemplateDescriptor {
        id: TemplateId::AspireWebappGcp,
        name: "aspire-webapp-gcp",
        cloud: Cloud::Gcp,
        service: "Cloud Run",
        description: ".NET Aspire web application with Redis cache, deployed to Google Cloud",
        asset_root: "aspire",
        default_region: "us-central1",
        default_database: Database::PostgreSql,
        implied: Features::CACHE,
        default_cpu: "1000m",
        default_memory: "2Gi",
    },
    TemplateDescriptor {
        id: TemplateId::AspireWebappAzure,
        name: "aspire-webapp-azure",
        cloud: Cloud::Azure,
        service: "Container Apps",
        description: ".NET Aspire web application with Redis cache, deployed to Azure",
        asset_root: "aspire",
        default_region: "eastus",
        default_database: Database::SqlServer,
        implied: Features::CACHE,
        default_cpu: "1.0",
        default_memory: "2.0Gi",
    },
    TemplateDescriptor {
        id: TemplateId::AspireFullstackAws,
        name: "aspire-fullstack-aws",
        cloud: Cloud::Aws,
        service: "ECS Fargate",
        description: ".NET Aspire stack with storage, mail, queue, jobs and worker, deployed to AWS",
        asset_root: "aspire",
        default_region: DEFAULT_REGION,
        default_database: Database::PostgreSql,
        implied: FULLSTACK,
        default_cpu: "1024",
        default_memory: "2048",
    },
    TemplateDescriptor {
        id: TemplateId::AspireFullstackGcp,
        name: "aspire-fullstack-gcp",
        cloud: Cloud::Gcp,
        service: "Cloud Run",
        description: ".NET Aspire stack with storage, mail, queue, jobs and worker, deployed to Google Cloud",
        asset_root: "aspire",
        default_region: "us-central1",
        default_database: Database::PostgreSql,
        implied: FULLSTACK,
        default_cpu: "1000m",
        default_memory: "2Gi",
    },
    TemplateDescriptor {
        id: TemplateId::AspireFullstackAzure,
        name: "aspire-fullstack-azure",
        cloud: Cloud::Azure,
        service: "Container Apps",
        description: ".NET Aspire stack with storage, mail, queue, jobs and worker, deployed to Azure",
        asset_root: "aspire",
        default_region: "eastus",
        default_database: Database::SqlServer,
        implied: FULLSTACK,
        default_cpu: "1.0",
        default_memory: "2.0Gi",
    },
];

impl TemplateId {
    pub const ALL: [TemplateId; 9] = [
        TemplateId::DotnetWebappAws,
        TemplateId::DotnetWebappGcp,
        TemplateId::DotnetWebappAzure,
        TemplateId::AspireWebappAws,
        TemplateId::AspireWebappGcp,
        TemplateId::AspireWebappAzure,
        TemplateId::AspireFullstackAws,
        TemplateId::AspireFullstackGcp,
        TemplateId::AspireFullstackAzure,
    ];

    pub fn descriptor(self) -> &'static TemplateDescriptor {
        // CATALOG is declared in the same order as the enum.
        &CATALOG[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.descriptor().name
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CATALOG
            .iter()
            .find(|d| d.name == s)
            .map(|d| d.id)
            .ok_or_else(|| Error::UnknownTemplate { name: s.to_string() })
    }
}

/// All descriptors, in catalog order.
pub fn templates() -> &'static [TemplateDescriptor] {
    &CATALOG
}
