use serde::Serialize;

use crate::Difficulty;

/// Star rating plus its fixed label/message pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Rating {
    pub stars: u8,
    pub label: &'static str,
    pub message: &'static str,
}

/// Deterministic score for a finished game.
///
/// `move_ratio = moves / required_move_count`; a time bonus rewards fast
/// games (1.2 under 60s, 1.1 under 120s); stars are
/// `round(clamp((1 / move_ratio) × bonus × 3, 1, 5))`.
pub fn difficulty_rating(difficulty: Difficulty, moves: u32, elapsed_secs: u32) -> Rating {
    let required = difficulty.settings().required_move_count;
    let move_ratio = moves as f32 / required as f32;

    let time_bonus = if elapsed_secs < 60 {
        1.2
    } else if elapsed_secs < 120 {
        1.1
    } else {
        1.0
    };

    let score = ((1.0 / move_ratio) * time_bonus * 3.0).clamp(1.0, 5.0);
    // round half-up; f32::round is not available in no_std
    let stars = (score + 0.5) as u8;

    let (label, message) = match stars {
        5 => (
            "Sobresaliente",
            "Tu memoria está excelente. Eres un verdadero maestro.",
        ),
        4 => ("Muy Bien", "Excelente desempeño. Mejora cada día."),
        3 => ("Bien", "Buen esfuerzo. Sigue practicando."),
        2 => (
            "Aceptable",
            "Vuelve a intentarlo. La práctica mejora la memoria.",
        ),
        _ => (
            "Principiante",
            "No te desanimes. Cada juego te hace más fuerte.",
        ),
    };

    Rating {
        stars,
        label,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimal_moves_under_a_minute_is_five_stars() {
        // easy: 10 required moves; ratio 1, bonus 1.2 -> 3.6 -> 4 stars
        let rating = difficulty_rating(Difficulty::Easy, 10, 30);
        assert_eq!(rating.stars, 4);
        assert_eq!(rating.label, "Muy Bien");

        // well under the required count caps at five
        let rating = difficulty_rating(Difficulty::Easy, 5, 30);
        assert_eq!(rating.stars, 5);
        assert_eq!(rating.label, "Sobresaliente");
    }

    #[test]
    fn slow_games_lose_the_time_bonus() {
        let fast = difficulty_rating(Difficulty::Medium, 16, 59);
        let slow = difficulty_rating(Difficulty::Medium, 16, 180);

        assert_eq!(fast.stars, 4); // 3.0 * 1.2
        assert_eq!(slow.stars, 3); // 3.0 * 1.0
    }

    #[test]
    fn many_moves_clamp_to_one_star() {
        let rating = difficulty_rating(Difficulty::Easy, 100, 300);

        assert_eq!(rating.stars, 1);
        assert_eq!(rating.label, "Principiante");
    }

    #[test]
    fn stars_stay_in_range_over_a_grid_of_inputs() {
        for difficulty in Difficulty::ALL {
            for moves in [1, 5, 10, 22, 40, 100] {
                for secs in [0, 59, 60, 119, 120, 600] {
                    let rating = difficulty_rating(difficulty, moves, secs);
                    assert!((1..=5).contains(&rating.stars));
                }
            }
        }
    }
}
