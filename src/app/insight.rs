use crate::domain::schema::EntityKind;
use crate::utils::error::{Result, SwapiError};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct InsightQuery {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub name: String,
    pub insight: String,
}

pub fn parse_kind(entity_type: &str) -> Result<EntityKind> {
    match entity_type {
        "person" => Ok(EntityKind::Person),
        "planet" => Ok(EntityKind::Planet),
        other => Err(SwapiError::InvalidQuery {
            field: "type".to_string(),
            value: other.to_string(),
            reason: "must be 'person' or 'planet'".to_string(),
        }),
    }
}

pub fn templates(kind: EntityKind, name: &str) -> [String; 3] {
    match kind {
        EntityKind::Person => [
            format!("{name} is a pivotal figure whose legacy shapes the galaxy's destiny."),
            format!("{name} exhibits extraordinary resilience in the face of galactic turmoil."),
            format!(
                "{name}'s journey reflects the classic hero's arc, full of trials and growth."
            ),
        ],
        EntityKind::Planet => [
            format!("{name} is known for its unique climate and vital strategic importance."),
            format!(
                "The diverse ecosystems of {name} make it a hub for galactic biodiversity."
            ),
            format!("{name} has long been a cultural and political center in the outer rim."),
        ],
    }
}

/// Canned "insight" for an entity; no model is consulted.
pub fn simulate<R: Rng + ?Sized>(query: &InsightQuery, rng: &mut R) -> Result<Insight> {
    let kind = parse_kind(&query.entity_type)?;
    if query.name.is_empty() {
        return Err(SwapiError::InvalidQuery {
            field: "name".to_string(),
            value: String::new(),
            reason: "must contain at least 1 character".to_string(),
        });
    }

    let options = templates(kind, &query.name);
    let insight = options
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| options[0].clone());

    Ok(Insight {
        entity_type: query.entity_type.clone(),
        name: query.name.clone(),
        insight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn query(entity_type: &str, name: &str) -> InsightQuery {
        InsightQuery {
            entity_type: entity_type.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_insight_uses_a_template_for_the_kind() {
        let mut rng = StdRng::seed_from_u64(7);
        let insight = simulate(&query("planet", "Hoth"), &mut rng).unwrap();

        assert_eq!(insight.entity_type, "planet");
        assert_eq!(insight.name, "Hoth");
        assert!(templates(EntityKind::Planet, "Hoth").contains(&insight.insight));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let mut rng = StdRng::seed_from_u64(7);
        let err = simulate(&query("droid", "R2-D2"), &mut rng).unwrap_err();
        assert!(matches!(err, SwapiError::InvalidQuery { ref field, .. } if field == "type"));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(simulate(&query("person", ""), &mut rng).is_err());
    }
}
