//! Read-only asset directory (vehicles, homes)

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{error::AppResult, models::enums::AssetKind};

/// Display data for an inventory asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    pub id: String,
    pub kind: AssetKind,
    /// e.g. "2024 Grand Design Imagine 2500RL"
    pub label: String,
}

/// Lookup into the dealership inventory
#[async_trait]
pub trait AssetDirectory: Send + Sync {
    async fn lookup(&self, asset_id: &str) -> AppResult<Option<AssetSummary>>;
}

/// Fixed in-process directory
#[derive(Debug, Clone, Default)]
pub struct StaticAssetDirectory {
    assets: IndexMap<String, AssetSummary>,
}

impl StaticAssetDirectory {
    pub fn new(assets: impl IntoIterator<Item = AssetSummary>) -> Self {
        Self {
            assets: assets.into_iter().map(|a| (a.id.clone(), a)).collect(),
        }
    }
}

#[async_trait]
impl AssetDirectory for StaticAssetDirectory {
    async fn lookup(&self, asset_id: &str) -> AppResult<Option<AssetSummary>> {
        Ok(self.assets.get(asset_id).cloned())
    }
}
