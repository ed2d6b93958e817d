//! Daily quest generation, progress tracking and reward claims.

use super::types::*;
use crate::character::{party_max_level, settle_level_ups, Character};
use crate::core::constants::{
    COLLECT_QUEST_MAX, COLLECT_QUEST_MIN, COLLECT_QUEST_REWARD, DAILY_QUEST_COUNT,
    DEFEAT_QUEST_EXTRA_MAX, DEFEAT_QUEST_EXTRA_MIN, DEFEAT_QUEST_REWARD, LEVEL_QUEST_REWARD,
};
use crate::core::error::GameError;
use crate::core::game_state::GameState;
use chrono::NaiveDate;
use rand::Rng;

fn base_reward(kind: QuestKind) -> (u64, u64) {
    match kind {
        QuestKind::DefeatCount => DEFEAT_QUEST_REWARD,
        QuestKind::ReachLevel => LEVEL_QUEST_REWARD,
        QuestKind::CollectEquipment => COLLECT_QUEST_REWARD,
    }
}

fn inventory_total(members: &[Character]) -> u32 {
    members.iter().map(|m| m.inventory.len() as u32).sum()
}

/// Build one quest of `kind`, scaled to the party.
pub fn generate_quest<R: Rng>(kind: QuestKind, members: &[Character], rng: &mut R) -> Quest {
    let max_level = party_max_level(members);
    let (target, progress) = match kind {
        QuestKind::DefeatCount => (
            max_level / 2 + rng.gen_range(DEFEAT_QUEST_EXTRA_MIN..=DEFEAT_QUEST_EXTRA_MAX),
            0,
        ),
        QuestKind::ReachLevel => (max_level + 1, max_level),
        QuestKind::CollectEquipment => {
            (rng.gen_range(COLLECT_QUEST_MIN..=COLLECT_QUEST_MAX), 0)
        }
    };
    let (exp, gold) = base_reward(kind);
    let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
    Quest {
        id: id.to_string(),
        kind,
        description: kind.describe(target),
        target,
        progress,
        completed: false,
        rewarded: false,
        reward: QuestReward {
            exp: exp * max_level as u64,
            gold: gold * max_level as u64,
        },
    }
}

/// A fresh batch of daily quests with uniformly chosen kinds.
pub fn generate_daily<R: Rng>(members: &[Character], rng: &mut R) -> Vec<Quest> {
    (0..DAILY_QUEST_COUNT)
        .map(|_| {
            let kind = QuestKind::ALL[rng.gen_range(0..QuestKind::ALL.len())];
            generate_quest(kind, members, rng)
        })
        .collect()
}

/// Replace the whole batch when `today` differs from the last generation date.
/// Returns true when a new batch was generated.
pub fn refresh_if_new_day<R: Rng>(
    board: &mut QuestBoard,
    members: &[Character],
    today: NaiveDate,
    rng: &mut R,
) -> bool {
    if board.last_generated == Some(today) {
        return false;
    }
    board.quests = generate_daily(members, rng);
    board.last_generated = Some(today);
    tracing::info!(%today, count = board.quests.len(), "daily quests generated");
    true
}

fn mark_if_done(quest: &mut Quest) {
    if quest.progress >= quest.target {
        quest.completed = true;
    }
}

/// Recompute state-derived progress. Completed quests are left untouched.
pub fn update_progress(board: &mut QuestBoard, members: &[Character]) {
    let max_level = party_max_level(members);
    let items = inventory_total(members);
    for quest in board.quests.iter_mut().filter(|q| !q.completed) {
        match quest.kind {
            QuestKind::ReachLevel => quest.progress = max_level,
            QuestKind::CollectEquipment => quest.progress = items,
            QuestKind::DefeatCount => {}
        }
        mark_if_done(quest);
    }
}

/// Count one monster defeat toward every open defeat quest.
pub fn record_defeat(board: &mut QuestBoard) {
    for quest in board
        .quests
        .iter_mut()
        .filter(|q| !q.completed && q.kind == QuestKind::DefeatCount)
    {
        quest.progress += 1;
        mark_if_done(quest);
    }
}

/// Pay out a completed quest: gold to the team, exp split evenly (floored)
/// across members, then level-ups. A second claim is refused and changes nothing.
pub fn claim_reward(state: &mut GameState, quest_id: &str) -> Result<ClaimReceipt, GameError> {
    let quest = state
        .quests
        .get(quest_id)
        .ok_or_else(|| GameError::UnknownQuest(quest_id.to_string()))?;
    if quest.rewarded {
        return Err(GameError::QuestAlreadyRewarded);
    }
    if !quest.completed {
        return Err(GameError::QuestNotCompleted);
    }
    let reward = quest.reward;

    if let Some(quest) = state.quests.get_mut(quest_id) {
        quest.rewarded = true;
    }
    state.team_gold += reward.gold;
    let exp_each = match state.members.len() as u64 {
        0 => 0,
        n => reward.exp / n,
    };
    let mut leveled_up = Vec::new();
    for member in state.members.iter_mut() {
        member.exp += exp_each;
        if settle_level_ups(member) > 0 {
            leveled_up.push(member.name.clone());
        }
    }
    tracing::info!(quest_id, gold = reward.gold, exp_each, "quest reward claimed");
    Ok(ClaimReceipt {
        quest_id: quest_id.to_string(),
        gold: reward.gold,
        exp_each,
        leveled_up,
    })
}
