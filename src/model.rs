use serde::{Deserialize, Deserializer};

mod node;
mod report;

pub use self::node::{HIDDEN_FOLDER, NodeKind, WorkspaceNode};
pub use self::report::{FileRestore, LogEntry, RestoreReport, StatusReport};

/// The engine sends empty lists as `null`; read those as the type's default.
pub(crate) fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}
