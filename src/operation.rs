//! Operation kinds and the mutability rules attached to them.
//!
//! Which mutability categories apply to a request depends only on the kind of
//! operation being performed. The tables in this module are fixed:
//!
//! | Category   | Forbidden in                                           | Treated as optional in   |
//! |------------|--------------------------------------------------------|--------------------------|
//! | ReadOnly   | create, batch_create, partial_update, batch_partial_update | create, batch_create |
//! | CreateOnly | partial_update, batch_partial_update                   | -                        |

use crate::error::ValidatorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The CRUD-style kind of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Create,
    BatchCreate,
    Update,
    BatchUpdate,
    PartialUpdate,
    BatchPartialUpdate,
    Get,
    BatchGet,
    Find,
    GetAll,
}

/// Which side of the wire an entity is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// A request body supplied by a client.
    Input,
    /// A response body produced by the server.
    Output,
}

/// How payloads of an operation kind are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationStrategy {
    /// The payload is a patch document; validate the delta it describes.
    PatchDelta,
    /// The payload is a complete entity.
    Entity(Direction),
}

impl OperationKind {
    pub const ALL: [OperationKind; 10] = [
        OperationKind::Create,
        OperationKind::BatchCreate,
        OperationKind::Update,
        OperationKind::BatchUpdate,
        OperationKind::PartialUpdate,
        OperationKind::BatchPartialUpdate,
        OperationKind::Get,
        OperationKind::BatchGet,
        OperationKind::Find,
        OperationKind::GetAll,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Create => "create",
            OperationKind::BatchCreate => "batch_create",
            OperationKind::Update => "update",
            OperationKind::BatchUpdate => "batch_update",
            OperationKind::PartialUpdate => "partial_update",
            OperationKind::BatchPartialUpdate => "batch_partial_update",
            OperationKind::Get => "get",
            OperationKind::BatchGet => "batch_get",
            OperationKind::Find => "find",
            OperationKind::GetAll => "get_all",
        }
    }

    pub fn strategy(self) -> ValidationStrategy {
        match self {
            OperationKind::PartialUpdate | OperationKind::BatchPartialUpdate => {
                ValidationStrategy::PatchDelta
            }
            OperationKind::Create
            | OperationKind::BatchCreate
            | OperationKind::Update
            | OperationKind::BatchUpdate => ValidationStrategy::Entity(Direction::Input),
            OperationKind::Get
            | OperationKind::BatchGet
            | OperationKind::Find
            | OperationKind::GetAll => ValidationStrategy::Entity(Direction::Output),
        }
    }

    pub fn is_batch(self) -> bool {
        matches!(
            self,
            OperationKind::BatchCreate
                | OperationKind::BatchUpdate
                | OperationKind::BatchPartialUpdate
                | OperationKind::BatchGet
        )
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = ValidatorError;

    /// Parse a snake_case operation name.
    ///
    /// Methods such as `delete` or `action` exist on resources but carry no
    /// payload to validate, so they are rejected like unknown names.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        OperationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| ValidatorError::UnsupportedOperation(name.to_string()))
    }
}

/// A declared mutability restriction on a set of paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutabilityCategory {
    /// Server-assigned; never supplied by clients on restricted operations.
    ReadOnly,
    /// Settable at creation only.
    CreateOnly,
}

const READ_ONLY_RESTRICTED: &[OperationKind] = &[
    OperationKind::Create,
    OperationKind::PartialUpdate,
    OperationKind::BatchCreate,
    OperationKind::BatchPartialUpdate,
];

const CREATE_ONLY_RESTRICTED: &[OperationKind] = &[
    OperationKind::PartialUpdate,
    OperationKind::BatchPartialUpdate,
];

const READ_ONLY_OPTIONAL: &[OperationKind] = &[OperationKind::Create, OperationKind::BatchCreate];

impl MutabilityCategory {
    pub const ALL: [MutabilityCategory; 2] =
        [MutabilityCategory::ReadOnly, MutabilityCategory::CreateOnly];

    /// Name under which the category appears in declared metadata.
    pub fn metadata_name(self) -> &'static str {
        match self {
            MutabilityCategory::ReadOnly => "ReadOnly",
            MutabilityCategory::CreateOnly => "CreateOnly",
        }
    }

    /// Look a category up by its metadata name.
    pub fn from_metadata_name(name: &str) -> Option<Self> {
        MutabilityCategory::ALL
            .into_iter()
            .find(|category| category.metadata_name() == name)
    }

    /// Operations in which fields of this category must not be supplied.
    pub fn restricted_operations(self) -> &'static [OperationKind] {
        match self {
            MutabilityCategory::ReadOnly => READ_ONLY_RESTRICTED,
            MutabilityCategory::CreateOnly => CREATE_ONLY_RESTRICTED,
        }
    }

    /// Operations in which fields of this category may be absent even when
    /// the schema requires them.
    pub fn optional_operations(self) -> &'static [OperationKind] {
        match self {
            MutabilityCategory::ReadOnly => READ_ONLY_OPTIONAL,
            MutabilityCategory::CreateOnly => &[],
        }
    }

    pub fn is_restricted_for(self, operation: OperationKind) -> bool {
        self.restricted_operations().contains(&operation)
    }

    pub fn is_optional_for(self, operation: OperationKind) -> bool {
        self.optional_operations().contains(&operation)
    }
}

impl fmt::Display for MutabilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.metadata_name())
    }
}
