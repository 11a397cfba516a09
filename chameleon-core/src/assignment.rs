use std::collections::BTreeSet;

use chameleon_types::{ContentBatch, GameError, PlayerId, RoundContent};
use rand::Rng;
use rand::seq::{SliceRandom, index};
use tracing::debug;

/// Random facts dealt at the start of a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundAssignment {
    pub starting_player: PlayerId,
    pub turn_order: Vec<PlayerId>,
    pub impostors: BTreeSet<PlayerId>,
    pub content: RoundContent,
    pub card_numbers: Vec<u32>, // indexed by PlayerId
}

impl RoundAssignment {
    pub fn is_impostor(&self, player_id: PlayerId) -> bool {
        self.impostors.contains(&player_id)
    }

    pub fn player_count(&self) -> usize {
        self.turn_order.len()
    }
}

/// Rotate `players` so that `start` comes first, keeping the cyclic order
pub fn create_turn_order<T: Clone>(players: &[T], start: usize) -> Vec<T> {
    assert!(
        start < players.len(),
        "turn order start {} out of range for {} players",
        start,
        players.len()
    );
    players[start..]
        .iter()
        .chain(players[..start].iter())
        .cloned()
        .collect()
}

/// Choose `min(configured, player_count - 1)` distinct impostors uniformly
pub fn pick_impostors<R: Rng + ?Sized>(
    player_count: usize,
    configured: usize,
    rng: &mut R,
) -> BTreeSet<PlayerId> {
    assert!(player_count >= 2, "cannot deal roles to {} players", player_count);
    assert!(configured >= 1, "impostor count must be at least 1");

    let count = configured.min(player_count - 1);
    index::sample(rng, player_count, count).into_iter().collect()
}

/// Pick the round's secret word uniformly from the batch
pub fn pick_secret<R: Rng + ?Sized>(
    batch: &ContentBatch,
    rng: &mut R,
) -> Result<RoundContent, GameError> {
    if batch.secrets.is_empty() {
        return Err(GameError::ContentUnavailable {
            reason: format!("topic '{}' has no secret words", batch.topic),
        });
    }
    let secret_index = rng.gen_range(0..batch.secrets.len());
    Ok(RoundContent {
        topic: batch.topic.clone(),
        secret_word: batch.secrets[secret_index].clone(),
    })
}

/// Random permutation of 1..=player_count
pub fn deal_card_numbers<R: Rng + ?Sized>(player_count: usize, rng: &mut R) -> Vec<u32> {
    let mut cards: Vec<u32> = (1..=player_count as u32).collect();
    cards.shuffle(rng);
    cards
}

pub struct AssignmentEngine;

impl AssignmentEngine {
    /// Deal a full round for a roster of `player_count` players
    pub fn assign<R: Rng + ?Sized>(
        player_count: usize,
        batch: &ContentBatch,
        impostor_count: usize,
        rng: &mut R,
    ) -> Result<RoundAssignment, GameError> {
        assert!(player_count > 0, "assignment requires at least one player");
        if batch.secrets.is_empty() {
            return Err(GameError::ContentUnavailable {
                reason: format!("topic '{}' has no secret words", batch.topic),
            });
        }

        let roster: Vec<PlayerId> = (0..player_count).collect();
        let starting_player = rng.gen_range(0..player_count);
        let turn_order = create_turn_order(&roster, starting_player);
        let impostors = pick_impostors(player_count, impostor_count, rng);
        let content = pick_secret(batch, rng)?;
        let card_numbers = deal_card_numbers(player_count, rng);

        debug!(
            "Dealt round: starting player {}, {} impostor(s), topic '{}'",
            starting_player,
            impostors.len(),
            content.topic
        );

        Ok(RoundAssignment {
            starting_player,
            turn_order,
            impostors,
            content,
            card_numbers,
        })
    }
}
