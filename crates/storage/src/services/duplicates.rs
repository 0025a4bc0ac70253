use strsim::jaro_winkler;

use crate::dto::player::DuplicatePlayerPair;
use crate::models::{NormalizedPlayerName, Player};

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.9;

/// Similarity of two player names in `[0, 1]`, insensitive to case,
/// accents and first/last name order.
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let a = NormalizedPlayerName::new(a);
    let b = NormalizedPlayerName::new(b);

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    jaro_winkler(&a.key(), &b.key())
}

/// The candidate in `candidates` most similar to `name`, if any reaches
/// `threshold`.
pub fn best_match<'a>(
    name: &str,
    candidates: &'a [Player],
    threshold: f64,
) -> Option<(&'a Player, f64)> {
    candidates
        .iter()
        .map(|player| (player, name_similarity(name, &player.name)))
        .filter(|(_, score)| *score >= threshold)
        .max_by(|a, b| a.1.total_cmp(&b.1))
}

/// Every pair of players whose names reach `threshold`, most similar first.
pub fn find_duplicate_pairs(players: &[Player], threshold: f64) -> Vec<DuplicatePlayerPair> {
    let keys: Vec<NormalizedPlayerName> = players
        .iter()
        .map(|player| NormalizedPlayerName::new(&player.name))
        .collect();

    let mut pairs = Vec::new();
    for i in 0..players.len() {
        for j in (i + 1)..players.len() {
            if keys[i].is_empty() || keys[j].is_empty() {
                continue;
            }
            let similarity = if keys[i] == keys[j] {
                1.0
            } else {
                jaro_winkler(&keys[i].key(), &keys[j].key())
            };

            if similarity >= threshold {
                pairs.push(DuplicatePlayerPair {
                    first: players[i].clone(),
                    second: players[j].clone(),
                    similarity,
                    same_number: players[i].number == players[j].number,
                });
            }
        }
    }

    pairs.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn player(name: &str, number: i16) -> Player {
        Player {
            player_id: Uuid::new_v4(),
            name: name.to_string(),
            number,
            handedness: "right".to_string(),
            is_goalkeeper: false,
            created_at: chrono::NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_reordered_accented_names_are_identical() {
        assert_eq!(name_similarity("Jan Novák", "novak jan"), 1.0);
    }

    #[test]
    fn test_typo_is_similar_but_unrelated_names_are_not() {
        assert!(name_similarity("Mikkel Hansen", "Mikel Hansen") >= DEFAULT_SIMILARITY_THRESHOLD);
        assert!(name_similarity("Mikkel Hansen", "Niklas Landin") < DEFAULT_SIMILARITY_THRESHOLD);
        assert_eq!(name_similarity("", "Niklas Landin"), 0.0);
    }

    #[test]
    fn test_find_duplicate_pairs() {
        let players = vec![
            player("Jan Novák", 7),
            player("Anna Berg", 12),
            player("Novak Jan", 7),
            player("Petra Svobodová", 3),
        ];

        let pairs = find_duplicate_pairs(&players, DEFAULT_SIMILARITY_THRESHOLD);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].first.name, "Jan Novák");
        assert_eq!(pairs[0].second.name, "Novak Jan");
        assert_eq!(pairs[0].similarity, 1.0);
        assert!(pairs[0].same_number);
    }

    #[test]
    fn test_best_match_respects_threshold() {
        let players = vec![player("Anna Berg", 12), player("Jan Novak", 7)];
        let (found, score) = best_match("Novák Jan", &players, 0.95).unwrap();
        assert_eq!(found.name, "Jan Novak");
        assert_eq!(score, 1.0);
        assert!(best_match("Zoltan Kovacs", &players, 0.95).is_none());
    }
}
