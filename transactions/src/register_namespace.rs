//! Register-namespace transaction: claim a root namespace for a duration,
//! or a sub-namespace under an existing parent.
//!
//! Body layout: `namespace type u8 | duration-or-parent u64 |
//! namespace id u64 | name size u8 | name bytes`. The middle u64 is the
//! duration for a root registration and the parent id for a sub
//! registration; the two are mutually exclusive.

use crate::catbuffer::{CatReader, CatWriter};
use crate::dto::{self, DtoMap};
use crate::error::TransactionError;
use crate::transaction::{Transaction, TransactionBody};
use serde_json::Value;
use sirius_types::{Deadline, NamespaceId, NetworkType};

pub(crate) const REQUIRED_DTO_KEYS: &[&str] = &["namespaceType", "namespaceId", "name"];

/// Root or sub registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamespaceType {
    Root,
    Sub,
}

impl NamespaceType {
    pub fn value(&self) -> u8 {
        match self {
            Self::Root => 0,
            Self::Sub => 1,
        }
    }

    pub fn from_value(value: u8) -> Result<Self, TransactionError> {
        match value {
            0 => Ok(Self::Root),
            1 => Ok(Self::Sub),
            other => Err(TransactionError::invalid(
                "namespaceType",
                format!("unknown value {other}"),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterNamespaceBody {
    pub namespace_type: NamespaceType,
    /// Lease duration in blocks; root registrations only.
    pub duration: Option<u64>,
    /// Parent namespace; sub registrations only.
    pub parent_id: Option<NamespaceId>,
    pub namespace_id: NamespaceId,
    pub name: String,
}

impl RegisterNamespaceBody {
    /// Build a body, enforcing that duration and parent are mutually
    /// exclusive and match the registration kind.
    pub fn checked(
        namespace_type: NamespaceType,
        name: impl Into<String>,
        namespace_id: NamespaceId,
        duration: Option<u64>,
        parent_id: Option<NamespaceId>,
    ) -> Result<Self, TransactionError> {
        match namespace_type {
            NamespaceType::Root => {
                if duration.is_none() || parent_id.is_some() {
                    return Err(TransactionError::Validation(
                        "root registration takes a duration and no parent".into(),
                    ));
                }
            }
            NamespaceType::Sub => {
                if parent_id.is_none() || duration.is_some() {
                    return Err(TransactionError::Validation(
                        "sub registration takes a parent and no duration".into(),
                    ));
                }
            }
        }
        let name = name.into();
        if name.len() > u8::MAX as usize {
            return Err(TransactionError::Validation(format!(
                "namespace name of {} bytes exceeds the one-byte size field",
                name.len()
            )));
        }
        Ok(Self {
            namespace_type,
            duration,
            parent_id,
            namespace_id,
            name,
        })
    }
}

impl Transaction {
    /// Register a root namespace for `duration` blocks. The id is derived
    /// from the name.
    pub fn register_root_namespace(
        network: NetworkType,
        deadline: Deadline,
        name: &str,
        duration: u64,
    ) -> Result<Self, TransactionError> {
        let namespace_id = NamespaceId::from_name(name)?;
        let body = RegisterNamespaceBody::checked(
            NamespaceType::Root,
            name,
            namespace_id,
            Some(duration),
            None,
        )?;
        Ok(Self::from_body(
            TransactionBody::RegisterNamespace(body),
            network,
            deadline,
        ))
    }

    /// Register `name` under the namespace named by `parent_name` (which may
    /// itself be dotted). Both ids are derived from the names.
    pub fn register_sub_namespace(
        network: NetworkType,
        deadline: Deadline,
        parent_name: &str,
        name: &str,
    ) -> Result<Self, TransactionError> {
        let parent_id = NamespaceId::from_name(parent_name)?;
        let namespace_id = NamespaceId::from_name(&format!("{parent_name}.{name}"))?;
        let body = RegisterNamespaceBody::checked(
            NamespaceType::Sub,
            name,
            namespace_id,
            None,
            Some(parent_id),
        )?;
        Ok(Self::from_body(
            TransactionBody::RegisterNamespace(body),
            network,
            deadline,
        ))
    }
}

impl RegisterNamespaceBody {
    pub(crate) fn size(&self) -> usize {
        1 + 8 + 8 + 1 + self.name.len()
    }

    pub(crate) fn write(&self, w: &mut CatWriter) {
        w.write_u8(self.namespace_type.value());
        let middle = match self.namespace_type {
            NamespaceType::Root => self.duration.unwrap_or(0),
            NamespaceType::Sub => self.parent_id.map(|p| p.as_u64()).unwrap_or(0),
        };
        w.write_u64(middle);
        w.write_u64(self.namespace_id.as_u64());
        w.write_u8(self.name.len() as u8);
        w.write_bytes(self.name.as_bytes());
    }

    pub(crate) fn read_body(
        r: &mut CatReader<'_>,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let namespace_type = NamespaceType::from_value(r.read_u8()?)?;
        let middle = r.read_u64()?;
        let namespace_id = NamespaceId::new(r.read_u64()?);
        let name_size = r.read_u8()? as usize;
        let name = String::from_utf8(r.read_bytes(name_size)?.to_vec())
            .map_err(|_| TransactionError::Validation("namespace name is not UTF-8".into()))?;
        let (duration, parent_id) = match namespace_type {
            NamespaceType::Root => (Some(middle), None),
            NamespaceType::Sub => (None, Some(NamespaceId::new(middle))),
        };
        Ok(TransactionBody::RegisterNamespace(Self::checked(
            namespace_type,
            name,
            namespace_id,
            duration,
            parent_id,
        )?))
    }

    pub(crate) fn dto_fields(&self, map: &mut DtoMap) {
        map.insert(
            "namespaceType".into(),
            Value::from(self.namespace_type.value()),
        );
        match self.namespace_type {
            NamespaceType::Root => {
                map.insert(
                    "duration".into(),
                    dto::u64_json(self.duration.unwrap_or(0)),
                );
            }
            NamespaceType::Sub => {
                map.insert(
                    "parentId".into(),
                    dto::u64_json(self.parent_id.map(|p| p.as_u64()).unwrap_or(0)),
                );
            }
        }
        map.insert(
            "namespaceId".into(),
            dto::u64_json(self.namespace_id.as_u64()),
        );
        map.insert("name".into(), Value::from(self.name.clone()));
    }

    pub(crate) fn body_from_dto(
        tx: &DtoMap,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let namespace_type = NamespaceType::from_value(dto::get_u8(tx, "namespaceType")?)?;
        let namespace_id = NamespaceId::new(dto::get_uint64(tx, "namespaceId")?);
        let name = dto::get_str(tx, "name")?.to_string();
        let (duration, parent_id) = match namespace_type {
            NamespaceType::Root => (Some(dto::get_uint64(tx, "duration")?), None),
            NamespaceType::Sub => (
                None,
                Some(NamespaceId::new(dto::get_uint64(tx, "parentId")?)),
            ),
        };
        Ok(TransactionBody::RegisterNamespace(Self::checked(
            namespace_type,
            name,
            namespace_id,
            duration,
            parent_id,
        )?))
    }

    pub(crate) fn validate_dto(tx: &DtoMap) -> bool {
        dto::has_keys(tx, REQUIRED_DTO_KEYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fee::FeeCalculationStrategy;

    fn deadline() -> Deadline {
        Deadline::from_network_ms(5_000_000)
    }

    #[test]
    fn root_registration_roundtrip() {
        let tx = Transaction::register_root_namespace(
            NetworkType::TestNet,
            deadline(),
            "foo",
            1000,
        )
        .unwrap();
        let bytes = tx.to_catbuffer(FeeCalculationStrategy::Zero);
        assert_eq!(bytes.len(), 122 + 1 + 8 + 8 + 1 + 3);
        let back = Transaction::create_from_catbuffer(&bytes).unwrap();
        assert_eq!(back.body, tx.body);
    }

    #[test]
    fn root_id_matches_name_derivation() {
        let tx = Transaction::register_root_namespace(
            NetworkType::TestNet,
            deadline(),
            "foo",
            1000,
        )
        .unwrap();
        let TransactionBody::RegisterNamespace(body) = &tx.body else {
            panic!("wrong body kind");
        };
        assert_eq!(body.namespace_id, NamespaceId::from_name("foo").unwrap());
        assert_eq!(body.duration, Some(1000));
        assert!(body.parent_id.is_none());
    }

    #[test]
    fn sub_registration_carries_parent() {
        let tx = Transaction::register_sub_namespace(
            NetworkType::TestNet,
            deadline(),
            "foo",
            "bar",
        )
        .unwrap();
        let TransactionBody::RegisterNamespace(body) = &tx.body else {
            panic!("wrong body kind");
        };
        assert_eq!(body.parent_id, Some(NamespaceId::from_name("foo").unwrap()));
        assert_eq!(
            body.namespace_id,
            NamespaceId::from_name("foo.bar").unwrap()
        );
        assert!(body.duration.is_none());

        let bytes = tx.to_catbuffer(FeeCalculationStrategy::Zero);
        let back = Transaction::create_from_catbuffer(&bytes).unwrap();
        assert_eq!(back.body, tx.body);
    }

    #[test]
    fn duration_and_parent_are_mutually_exclusive() {
        let id = NamespaceId::from_name("foo").unwrap();
        let err = RegisterNamespaceBody::checked(
            NamespaceType::Root,
            "foo",
            id,
            Some(1000),
            Some(id),
        )
        .unwrap_err();
        assert!(matches!(err, TransactionError::Validation(_)));

        let err =
            RegisterNamespaceBody::checked(NamespaceType::Sub, "bar", id, Some(1000), Some(id))
                .unwrap_err();
        assert!(matches!(err, TransactionError::Validation(_)));
    }

    #[test]
    fn name_must_fit_the_size_byte() {
        let id = NamespaceId::from_name("foo").unwrap();
        let err = RegisterNamespaceBody::checked(
            NamespaceType::Root,
            "a".repeat(300),
            id,
            Some(1000),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, TransactionError::Validation(_)));
    }

    #[test]
    fn invalid_name_rejected_at_construction() {
        assert!(Transaction::register_root_namespace(
            NetworkType::TestNet,
            deadline(),
            "Foo",
            1000
        )
        .is_err());
    }

    #[test]
    fn dto_roundtrip_both_kinds() {
        for tx in [
            Transaction::register_root_namespace(NetworkType::TestNet, deadline(), "foo", 1000)
                .unwrap(),
            Transaction::register_sub_namespace(NetworkType::TestNet, deadline(), "foo", "bar")
                .unwrap(),
        ] {
            let back = Transaction::create_from_dto(&tx.to_dto()).unwrap();
            assert_eq!(back.body, tx.body);
        }
    }
}
