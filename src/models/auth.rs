use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Roles del sistema
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    ScOps,
    /// Rol desconocido: se conserva pero no concede permisos
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "ROLE_ADMIN",
            Role::ScOps => "ROLE_SC_OPS",
            Role::Other(tag) => tag,
        }
    }

    /// Acepta la forma del servidor (`ROLE_ADMIN`) y la forma corta (`ADMIN`)
    pub fn from_tag(tag: &str) -> Self {
        let trimmed = tag.trim();
        let upper = trimmed.to_ascii_uppercase();
        match upper.strip_prefix("ROLE_").unwrap_or(&upper) {
            "ADMIN" => Role::Admin,
            "SC_OPS" => Role::ScOps,
            _ => Role::Other(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Role::from_tag(&tag))
    }
}

/// Sesión del usuario autenticado
///
/// Se crea en el login y se borra entera en el logout; nunca se modifica
/// campo a campo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub roles: Vec<Role>,
    pub username: String,
    pub employee_name: String,
    pub token: String,
}

impl Session {
    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(&Role::Admin)
    }

    pub fn is_sc_ops(&self) -> bool {
        self.has_role(&Role::ScOps)
    }

    /// Rol "principal": el primero de la lista, solo para mostrar
    pub fn primary_role(&self) -> Option<&Role> {
        self.roles.first()
    }
}
