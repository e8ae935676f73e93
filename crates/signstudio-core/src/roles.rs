//! Signer roles and their palette colors.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RegistryError;
use crate::ids::{self, RoleId};

/// Display color token for a role. Assigned round-robin from [`RoleColor::PALETTE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleColor {
    Blue,
    Emerald,
    Amber,
    Rose,
    Violet,
    Cyan,
}

impl RoleColor {
    pub const PALETTE: [RoleColor; 6] = [
        Self::Blue,
        Self::Emerald,
        Self::Amber,
        Self::Rose,
        Self::Violet,
        Self::Cyan,
    ];

    /// Palette color for the role created at position `index`.
    pub fn for_index(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Emerald => "emerald",
            Self::Amber => "amber",
            Self::Rose => "rose",
            Self::Violet => "violet",
            Self::Cyan => "cyan",
        }
    }
}

/// A named signer slot that fields are assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub color: RoleColor,
}

/// Roles in creation order. Roles are referenced by fields, never owned by them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Role>", into = "Vec<Role>")]
pub struct RoleRegistry {
    roles: Vec<Role>,
    next_id: u64,
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// `Signer N` role for position `index`, with that position's palette color.
fn signer(index: usize, id: RoleId) -> Role {
    Role {
        id,
        name: format!("Signer {}", index + 1),
        color: RoleColor::for_index(index),
    }
}

impl RoleRegistry {
    /// An empty registry. Templates normally start from [`with_defaults`](Self::with_defaults).
    pub fn empty() -> Self {
        Self {
            roles: Vec::new(),
            next_id: 1,
        }
    }

    /// The two signer roles every new template starts with.
    pub fn with_defaults() -> Self {
        Self {
            roles: vec![signer(0, RoleId::numbered(1)), signer(1, RoleId::numbered(2))],
            next_id: 3,
        }
    }

    /// Append `Signer N` (N = current count + 1) with the next palette color.
    pub fn add(&mut self) -> Result<&Role, RegistryError> {
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or(RegistryError::IdsExhausted(RoleId::PREFIX))?;
        let index = self.roles.len();
        let role = signer(index, RoleId::numbered(self.next_id));
        self.next_id = next_id;
        debug!(id = %role.id, color = role.color.as_str(), "role added");
        self.roles.push(role);
        Ok(&self.roles[index])
    }

    pub fn rename(&mut self, id: &RoleId, name: impl Into<String>) -> Result<(), RegistryError> {
        let role = self
            .roles
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| RegistryError::UnknownRole(id.clone()))?;
        role.name = name.into();
        Ok(())
    }

    pub fn get(&self, id: &RoleId) -> Option<&Role> {
        self.roles.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &RoleId) -> bool {
        self.get(id).is_some()
    }

    pub fn first(&self) -> Option<&Role> {
        self.roles.first()
    }

    pub fn all(&self) -> &[Role] {
        &self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Rebuild a registry from stored roles. Ids must be unique, and id
/// generation resumes past the highest `role-N`.
impl TryFrom<Vec<Role>> for RoleRegistry {
    type Error = RegistryError;

    fn try_from(roles: Vec<Role>) -> Result<Self, Self::Error> {
        for (i, role) in roles.iter().enumerate() {
            if roles[..i].iter().any(|r| r.id == role.id) {
                return Err(RegistryError::DuplicateRole(role.id.clone()));
            }
        }
        let next_id = ids::next_sequence(roles.iter().map(|r| &r.id), RoleId::sequence)
            .ok_or(RegistryError::IdsExhausted(RoleId::PREFIX))?;
        Ok(Self { roles, next_id })
    }
}

impl From<RoleRegistry> for Vec<Role> {
    fn from(reg: RoleRegistry) -> Self {
        reg.roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_two_signers() {
        let reg = RoleRegistry::with_defaults();
        let names: Vec<_> = reg.all().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Signer 1", "Signer 2"]);
        assert_eq!(reg.all()[0].color, RoleColor::Blue);
        assert_eq!(reg.all()[1].color, RoleColor::Emerald);
    }

    #[test]
    fn colors_cycle_past_palette_length() {
        let mut reg = RoleRegistry::empty();
        let total = RoleColor::PALETTE.len() * 2 + 1;
        for _ in 0..total {
            reg.add().unwrap();
        }
        for (i, role) in reg.all().iter().enumerate() {
            assert_eq!(role.color, RoleColor::PALETTE[i % RoleColor::PALETTE.len()]);
        }
        assert_eq!(reg.all()[RoleColor::PALETTE.len()].color, RoleColor::Blue);
    }

    #[test]
    fn name_counts_from_current_length() {
        let mut reg = RoleRegistry::with_defaults();
        assert_eq!(reg.add().unwrap().name, "Signer 3");
    }

    #[test]
    fn rename_unknown_role_fails() {
        let mut reg = RoleRegistry::with_defaults();
        reg.rename(&RoleId::numbered(1), "Donor").unwrap();
        assert_eq!(reg.all()[0].name, "Donor");
        assert_eq!(
            reg.rename(&RoleId::numbered(42), "Nobody"),
            Err(RegistryError::UnknownRole(RoleId::numbered(42)))
        );
    }

    #[test]
    fn loaded_registry_generates_fresh_ids() {
        let json = r#"[
            {"id": "role-4", "name": "Donor", "color": "blue"},
            {"id": "board", "name": "Board Chair", "color": "emerald"}
        ]"#;
        let mut reg: RoleRegistry = serde_json::from_str(json).unwrap();
        let added = reg.add().unwrap().clone();
        assert_eq!(added.id, RoleId::numbered(5));
        assert_eq!(added.name, "Signer 3");
        assert_eq!(added.color, RoleColor::Amber);
    }

    #[test]
    fn duplicate_role_ids_are_rejected() {
        let json = r#"[
            {"id": "role-1", "name": "Donor", "color": "blue"},
            {"id": "role-1", "name": "Witness", "color": "emerald"}
        ]"#;
        let err = serde_json::from_str::<RoleRegistry>(json).unwrap_err();
        assert!(err.to_string().contains("role id already in use: role-1"));
    }

    #[test]
    fn exhausted_role_ids_are_rejected() {
        let roles = vec![Role {
            id: RoleId::numbered(u64::MAX),
            name: "Donor".into(),
            color: RoleColor::Blue,
        }];
        assert_eq!(
            RoleRegistry::try_from(roles),
            Err(RegistryError::IdsExhausted(RoleId::PREFIX))
        );

        let mut reg = RoleRegistry::empty();
        reg.next_id = u64::MAX;
        assert_eq!(reg.add(), Err(RegistryError::IdsExhausted(RoleId::PREFIX)));
        assert!(reg.is_empty());
    }
}
