//! Resolved organization blocks of a principal.

use serde::Serialize;

use orgscope_core::{DirectorateId, InstitutionId, StructurePath};

use crate::vocabulary::closed_vocabulary;

closed_vocabulary! {
    /// What an organizational unit does in the order flow.
    pub enum ActivityType {
        Provider => "PROVIDER",
        Consumer => "CONSUMER",
        Both => "BOTH",
    }
}

closed_vocabulary! {
    /// Administrative rank of an institution.
    pub enum RankType {
        Head => "HEAD",
        Regional => "REGIONAL",
        Local => "LOCAL",
    }
}

impl ActivityType {
    /// Whether the unit provides services (alone or alongside consuming them).
    pub fn provides(self) -> bool {
        match self {
            ActivityType::Provider | ActivityType::Both => true,
            ActivityType::Consumer => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorateInfo {
    pub id: DirectorateId,
    pub name: Option<String>,
    pub activity_type: Option<ActivityType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstitutionInfo {
    pub id: InstitutionId,
    pub name: String,
    pub activity_type: ActivityType,
    pub rank_type: RankType,
    /// Principal's full position in the tree, ancestor first.
    pub path: StructurePath,
    pub directorate: Option<DirectorateInfo>,
}

impl InstitutionInfo {
    pub fn directorate_id(&self) -> Option<DirectorateId> {
        self.directorate.as_ref().map(|d| d.id)
    }
}
