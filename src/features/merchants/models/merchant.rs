use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Merchant compliance status enum matching database enum
///
/// `SinFoco`, `EnObservacion` and `Prioritario` are the canonical
/// classifications; the remaining variants are inspection-workflow states
/// kept for badge rendering. Values outside this enumeration never enter
/// the system: deserialization fails at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "merchant_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum MerchantStatus {
    SinFoco,
    EnObservacion,
    Prioritario,
    EnRevision,
    Aprobado,
    Rechazado,
}

impl MerchantStatus {
    pub const ALL: [MerchantStatus; 6] = [
        MerchantStatus::SinFoco,
        MerchantStatus::EnObservacion,
        MerchantStatus::Prioritario,
        MerchantStatus::EnRevision,
        MerchantStatus::Aprobado,
        MerchantStatus::Rechazado,
    ];

    /// Display label - the single source every presentation surface uses
    pub fn label(&self) -> &'static str {
        match self {
            MerchantStatus::SinFoco => "Sin Foco",
            MerchantStatus::EnObservacion => "En Observación",
            MerchantStatus::Prioritario => "Prioritario",
            MerchantStatus::EnRevision => "En Revisión",
            MerchantStatus::Aprobado => "Aprobado",
            MerchantStatus::Rechazado => "Rechazado",
        }
    }

    /// Badge color (hex) - paired with `label` in the shared catalog
    pub fn color(&self) -> &'static str {
        match self {
            MerchantStatus::SinFoco => "#10B981",
            MerchantStatus::EnObservacion => "#F59E0B",
            MerchantStatus::Prioritario => "#EF4444",
            MerchantStatus::EnRevision => "#3B82F6",
            MerchantStatus::Aprobado => "#22C55E",
            MerchantStatus::Rechazado => "#EF4444",
        }
    }
}

impl std::fmt::Display for MerchantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MerchantStatus::SinFoco => write!(f, "sin-foco"),
            MerchantStatus::EnObservacion => write!(f, "en-observacion"),
            MerchantStatus::Prioritario => write!(f, "prioritario"),
            MerchantStatus::EnRevision => write!(f, "en-revision"),
            MerchantStatus::Aprobado => write!(f, "aprobado"),
            MerchantStatus::Rechazado => write!(f, "rechazado"),
        }
    }
}

impl std::str::FromStr for MerchantStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sin-foco" => Ok(MerchantStatus::SinFoco),
            "en-observacion" => Ok(MerchantStatus::EnObservacion),
            "prioritario" => Ok(MerchantStatus::Prioritario),
            "en-revision" => Ok(MerchantStatus::EnRevision),
            "aprobado" => Ok(MerchantStatus::Aprobado),
            "rechazado" => Ok(MerchantStatus::Rechazado),
            _ => Err(()),
        }
    }
}

/// Stand type enum matching database enum
///
/// The registration path accepts no alternative to `Semifijo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "stand_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StandType {
    Semifijo,
}

impl std::fmt::Display for StandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StandType::Semifijo => write!(f, "semifijo"),
        }
    }
}

/// Database model for merchant
#[derive(Debug, Clone, FromRow)]
pub struct Merchant {
    pub id: Uuid,
    pub name: String,
    pub business: String,
    pub address: Option<String>,
    pub delegation: String,
    pub latitude: f64,
    pub longitude: f64,
    pub organization_id: Option<Uuid>,
    pub schedule_start: Option<String>,
    pub schedule_end: Option<String>,
    pub status: MerchantStatus,
    pub stand_type: StandType,
    pub registered_by: Uuid,
    pub stall_photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Merchant row joined with its organization's display name
#[derive(Debug, Clone, FromRow)]
pub struct MerchantWithOrganization {
    #[sqlx(flatten)]
    pub merchant: Merchant,
    pub organization_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&MerchantStatus::EnObservacion).unwrap();
        assert_eq!(json, "\"en-observacion\"");
        let json = serde_json::to_string(&MerchantStatus::SinFoco).unwrap();
        assert_eq!(json, "\"sin-foco\"");
    }

    #[test]
    fn test_status_deserializes_known_values() {
        let status: MerchantStatus = serde_json::from_str("\"prioritario\"").unwrap();
        assert_eq!(status, MerchantStatus::Prioritario);
        let status: MerchantStatus = serde_json::from_str("\"en-revision\"").unwrap();
        assert_eq!(status, MerchantStatus::EnRevision);
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        assert!(serde_json::from_str::<MerchantStatus>("\"pendiente\"").is_err());
        assert!(serde_json::from_str::<MerchantStatus>("\"EN-OBSERVACION\"").is_err());
        assert!(serde_json::from_str::<MerchantStatus>("\"\"").is_err());
    }

    #[test]
    fn test_status_display_matches_serde() {
        for status in MerchantStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
    }

    #[test]
    fn test_status_catalog_covers_all_variants() {
        assert_eq!(MerchantStatus::ALL.len(), 6);
        for status in MerchantStatus::ALL {
            assert!(!status.label().is_empty());
            assert!(status.color().starts_with('#'));
        }
    }

    #[test]
    fn test_canonical_status_colors() {
        assert_eq!(MerchantStatus::SinFoco.color(), "#10B981");
        assert_eq!(MerchantStatus::EnObservacion.color(), "#F59E0B");
        assert_eq!(MerchantStatus::Prioritario.color(), "#EF4444");
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            "en-observacion".parse::<MerchantStatus>(),
            Ok(MerchantStatus::EnObservacion)
        );
        assert_eq!("aprobado".parse::<MerchantStatus>(), Ok(MerchantStatus::Aprobado));
        assert!("activo".parse::<MerchantStatus>().is_err());
        assert!("Sin Foco".parse::<MerchantStatus>().is_err());
    }

    #[test]
    fn test_stand_type_serializes_lowercase() {
        let json = serde_json::to_string(&StandType::Semifijo).unwrap();
        assert_eq!(json, "\"semifijo\"");
        assert!(serde_json::from_str::<StandType>("\"fijo\"").is_err());
    }
}
