use hashbrown::HashSet;

/// Identifier of a catalog reward.
pub type RewardId = u8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RewardKind {
    Historical,
    Personal,
    Achievement,
}

/// A static unlockable content entry. Unlocked-state lives outside the
/// catalog, in [`UnlockedRewards`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Reward {
    pub id: RewardId,
    pub title: &'static str,
    pub description: &'static str,
    pub content: &'static str,
    pub icon: &'static str,
    pub kind: RewardKind,
}

pub const REWARDS: &[Reward] = &[
    Reward {
        id: 1,
        title: "Datos Históricos: La Rosa",
        description: "Aprende sobre la historia de la flor más romántica",
        content: "La rosa es símbolo de amor desde la antigüedad. En la Edad Media, los poetas \
                  españoles ya cantaban sus virtudes. En Venezuela, las rosas crecen en todas las \
                  regiones.",
        icon: "🌹",
        kind: RewardKind::Historical,
    },
    Reward {
        id: 2,
        title: "Datos Históricos: El Girasol",
        description: "El seguidor del sol, emblema de lealtad",
        content: "Van Gogh pintó los girasoles como símbolo de alegría. En la antigüedad, los \
                  aztecas lo consideraban sagrado. El girasol sigue al sol durante todo el día, un \
                  acto de devoción.",
        icon: "🌻",
        kind: RewardKind::Historical,
    },
    Reward {
        id: 3,
        title: "Datos Históricos: El Tulipán",
        description: "La flor que enloqueció a Europa en el siglo XVII",
        content: "Los tulipanes causaron la \"Tulipomanía\" en Holanda. Un solo bulbo podía valer \
                  una casa. Los tulipanes simbolizan la perfección y la elegancia en el mundo.",
        icon: "🌷",
        kind: RewardKind::Historical,
    },
    Reward {
        id: 4,
        title: "Logro Especial: Maestro del Nivel Fácil",
        description: "Completaste el nivel fácil con menos de 10 movimientos",
        content: "Excelente memoria visual. Tu hipocampo está trabajando de maravilla. Esto \
                  demuestra control y precisión en tus decisiones.",
        icon: "⭐",
        kind: RewardKind::Achievement,
    },
    Reward {
        id: 5,
        title: "Logro Especial: Campeón del Tiempo",
        description: "Ganaste un nivel en menos de 2 minutos",
        content: "Tu velocidad de procesamiento es excepcional. Demostraste concentración y \
                  agilidad mental. Los adultos mayores con estas habilidades tienen mejor calidad \
                  de vida.",
        icon: "🏆",
        kind: RewardKind::Achievement,
    },
    Reward {
        id: 6,
        title: "Datos Históricos: La Flor de Loto",
        description: "Símbolo de renacimiento y purificación",
        content: "En la filosofía oriental, la flor de loto representa la transformación del \
                  espíritu. Florece en aguas turbias, simbolizando esperanza. En Venezuela, \
                  florece en los humedales.",
        icon: "🪷",
        kind: RewardKind::Historical,
    },
];

pub fn reward_by_id(id: RewardId) -> Option<&'static Reward> {
    REWARDS.iter().find(|reward| reward.id == id)
}

/// The set of reward ids the player has unlocked. The catalog defines no
/// trigger conditions; callers decide when to unlock.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnlockedRewards {
    ids: HashSet<RewardId>,
}

impl UnlockedRewards {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when `id` names a catalog reward that was still locked.
    pub fn unlock(&mut self, id: RewardId) -> bool {
        if reward_by_id(id).is_none() {
            log::warn!("ignoring unlock of unknown reward {}", id);
            return false;
        }
        self.ids.insert(id)
    }

    pub fn is_unlocked(&self, id: RewardId) -> bool {
        self.ids.contains(&id)
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_is_idempotent() {
        let mut unlocked = UnlockedRewards::new();

        assert!(unlocked.unlock(1));
        assert!(!unlocked.unlock(1));
        assert!(unlocked.is_unlocked(1));
        assert_eq!(unlocked.count(), 1);
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut unlocked = UnlockedRewards::new();

        assert!(!unlocked.unlock(99));
        assert_eq!(unlocked.count(), 0);
    }

    #[test]
    fn catalog_lookup_finds_every_entry() {
        for reward in REWARDS {
            assert_eq!(reward_by_id(reward.id), Some(reward));
        }
    }
}
