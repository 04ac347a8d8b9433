use crate::types::FlowerId;

/// A static catalog entry. The catalog is fixed at startup; decks reference
/// entries by id.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Flower {
    pub id: FlowerId,
    pub name: &'static str,
    pub emoji: &'static str,
}

pub const FLOWERS: &[Flower] = &[
    Flower { id: 1, name: "Rosa", emoji: "🌹" },
    Flower { id: 2, name: "Girasol", emoji: "🌻" },
    Flower { id: 3, name: "Tulipán", emoji: "🌷" },
    Flower { id: 4, name: "Flor de Loto", emoji: "🪷" },
    Flower { id: 5, name: "Margarita", emoji: "🌼" },
    Flower { id: 6, name: "Lirio", emoji: "⚜️" },
    Flower { id: 7, name: "Flor de Cerezo", emoji: "🌸" },
    Flower { id: 8, name: "Hibisco", emoji: "🌺" },
];

pub fn flower_by_id(id: FlowerId) -> Option<&'static Flower> {
    FLOWERS.iter().find(|flower| flower.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        for flower in FLOWERS {
            assert_eq!(flower_by_id(flower.id), Some(flower));
        }
    }

    #[test]
    fn unknown_id_has_no_entry() {
        assert_eq!(flower_by_id(0), None);
        assert_eq!(flower_by_id(9), None);
    }
}
