//! Quiz-gated battle state machine.
//!
//! A battle owns its monster and walks through [`BattlePhase`]s. Every
//! operation takes the save's [`GameState`] explicitly, checks the current
//! phase first and refuses with `InvalidBattleAction` when it does not apply.

use super::math::*;
use super::types::*;
use crate::catalog::{Catalog, MapDef};
use crate::character::{party_max_level, revive, settle_level_ups, take_damage};
use crate::core::constants::{
    EQUIPMENT_DROP_CHANCE, FLEE_FAIL_CHANCE, MAX_QUESTION_LEVEL, REVIVE_COST,
    REVIVE_HEALTH_FRACTION,
};
use crate::core::error::GameError;
use crate::core::events::{BattleOutcome, GameEvent};
use crate::core::game_state::GameState;
use crate::quests::{record_defeat, update_progress};
use crate::quiz::{adjudicate, select_question, Question};
use rand::Rng;

fn roll_in<R: Rng>(range: [u32; 2], rng: &mut R) -> u32 {
    let (lo, hi) = (range[0].min(range[1]), range[0].max(range[1]));
    rng.gen_range(lo..=hi)
}

/// Pick a monster living in the map's level range and roll its stats.
pub fn generate_encounter<R: Rng>(
    catalog: &Catalog,
    map: &MapDef,
    rng: &mut R,
) -> Result<Monster, GameError> {
    let candidates = catalog.monsters_for_map(map.level_range);
    if candidates.is_empty() {
        return Err(GameError::NoMonsterForMap {
            min: map.level_range[0],
            max: map.level_range[1],
        });
    }
    let name = candidates[rng.gen_range(0..candidates.len())];
    let def = catalog
        .monster(name)
        .ok_or_else(|| GameError::data_unavailable("monster catalog", name))?;
    let health = roll_in(def.health_range, rng).max(1);
    let attack = roll_in(def.attack_range, rng);
    let defense = roll_in(def.defense_range, rng);
    Ok(Monster::from_def(name, def, health, attack, defense))
}

/// True when an escape roll in `[0, 1)` succeeds.
pub fn resolve_flee(roll: f64) -> bool {
    roll >= FLEE_FAIL_CHANCE
}

/// True when a drop roll in `[0, 1)` yields equipment.
pub fn roll_drop(roll: f64) -> bool {
    roll < EQUIPMENT_DROP_CHANCE
}

#[derive(Debug, Clone)]
pub struct Battle {
    monster: Monster,
    map: String,
    mode: BattleMode,
    phase: BattlePhase,
    question: Option<Question>,
    turns: u32,
    log: Vec<String>,
    events: Vec<GameEvent>,
}

impl Battle {
    pub fn new(monster: Monster, map: impl Into<String>) -> Self {
        let map = map.into();
        let log = vec![format!(
            "A level {} {} appears in {}! (HP {}, ATK {}, DEF {})",
            monster.level, monster.name, map, monster.health, monster.attack, monster.defense
        )];
        Self {
            monster,
            map,
            mode: BattleMode::Single { member: 0 },
            phase: BattlePhase::AwaitingStart,
            question: None,
            turns: 0,
            log,
            events: Vec::new(),
        }
    }

    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    pub fn map(&self) -> &str {
        &self.map
    }

    pub fn mode(&self) -> BattleMode {
        self.mode
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Presentation events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Victory => Some(BattleOutcome::Victory),
            BattlePhase::Defeat => Some(BattleOutcome::Defeat),
            BattlePhase::Fled => Some(BattleOutcome::Fled),
            _ => None,
        }
    }

    fn expect_phase(&self, allowed: &[BattlePhase], action: &'static str) -> Result<(), GameError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(GameError::InvalidBattleAction {
                action,
                phase: self.phase.name(),
            })
        }
    }

    fn note(&mut self, line: String) {
        tracing::debug!(battle = %self.monster.name, "{}", line);
        self.log.push(line);
    }

    /// Indices of the members this battle's mode puts at risk.
    pub fn relevant_members(&self, state: &GameState) -> Vec<usize> {
        match self.mode {
            BattleMode::Single { member } => vec![member],
            BattleMode::Team => (0..state.members.len()).collect(),
        }
    }

    fn all_relevant_downed(&self, state: &GameState) -> bool {
        self.relevant_members(state)
            .into_iter()
            .all(|i| state.members.get(i).map_or(true, |m| m.is_downed()))
    }

    /// Choose who fights and begin the question loop.
    pub fn start(&mut self, state: &GameState, mode: BattleMode) -> Result<(), GameError> {
        self.expect_phase(&[BattlePhase::AwaitingStart], "start")?;
        let who = match mode {
            BattleMode::Single { member } => state.member(member)?.name.clone(),
            BattleMode::Team => "the whole party".to_string(),
        };
        self.mode = mode;
        self.phase = BattlePhase::QuestionActive;
        self.note(format!("{} steps forward!", who));
        if self.all_relevant_downed(state) {
            self.phase = BattlePhase::PartyDowned;
            self.note("Nobody is able to fight.".to_string());
        }
        tracing::info!(monster = %self.monster.name, ?mode, "battle started");
        Ok(())
    }

    pub fn start_single(&mut self, state: &GameState, member: usize) -> Result<(), GameError> {
        self.start(state, BattleMode::Single { member })
    }

    pub fn start_team(&mut self, state: &GameState) -> Result<(), GameError> {
        self.start(state, BattleMode::Team)
    }

    /// Question difficulty: the fighter's level (single) or the party's best
    /// level (team), capped at 6.
    pub fn question_level(&self, state: &GameState) -> u32 {
        let level = match self.mode {
            BattleMode::Single { member } => state.members.get(member).map_or(1, |m| m.level),
            BattleMode::Team => party_max_level(&state.members),
        };
        level.min(MAX_QUESTION_LEVEL)
    }

    /// Draw the next question for this turn.
    ///
    /// When no question can be found the turn has nothing to show; the
    /// caller should still submit, and the empty turn counts as wrong.
    pub fn prepare_question<R: Rng>(
        &mut self,
        state: &GameState,
        catalog: &Catalog,
        rng: &mut R,
    ) -> Result<&Question, GameError> {
        self.expect_phase(&[BattlePhase::QuestionActive], "ask a question")?;
        let level = self.question_level(state);
        match select_question(&catalog.questions, state.track, level, rng) {
            Ok(question) => Ok(self.question.insert(question.clone())),
            Err(err) => {
                self.question = None;
                self.note("No question could be found; the turn is lost.".to_string());
                Err(err)
            }
        }
    }

    /// Adjudicate the current question and resolve the exchange.
    /// `None` means the timer ran out.
    pub fn submit_answer<R: Rng>(
        &mut self,
        state: &mut GameState,
        catalog: &Catalog,
        answer: Option<&str>,
        rng: &mut R,
    ) -> Result<TurnOutcome, GameError> {
        self.expect_phase(&[BattlePhase::QuestionActive], "answer")?;
        let correct = self
            .question
            .take()
            .is_some_and(|question| adjudicate(&question, answer));
        self.turns += 1;
        if correct {
            self.events.push(GameEvent::CorrectAnswer);
            Ok(self.party_attacks(state, catalog, rng))
        } else {
            self.events.push(GameEvent::WrongAnswer);
            if answer.is_none() {
                self.note("Time is up!".to_string());
            }
            Ok(self.monster_attacks(state))
        }
    }

    fn party_attacks<R: Rng>(
        &mut self,
        state: &mut GameState,
        catalog: &Catalog,
        rng: &mut R,
    ) -> TurnOutcome {
        let total_attack: u32 = self
            .relevant_members(state)
            .into_iter()
            .filter_map(|i| state.members.get(i))
            .map(|m| member_attack(m, catalog, &state.enhancements))
            .sum();
        let damage = self
            .monster
            .take_damage(correct_answer_damage(total_attack, self.monster.defense));
        self.note(format!(
            "Correct! {} takes {} damage ({} HP left).",
            self.monster.name, damage, self.monster.health
        ));

        if self.monster.is_alive() {
            return TurnOutcome::MonsterHit {
                damage,
                remaining: self.monster.health,
            };
        }
        let payout = self.pay_victory(state, catalog, rng);
        TurnOutcome::MonsterDefeated { damage, payout }
    }

    fn monster_attacks(&mut self, state: &mut GameState) -> TurnOutcome {
        let damage = wrong_answer_damage(self.monster.attack);
        let targets = self.relevant_members(state);
        let share = match self.mode {
            BattleMode::Single { .. } => damage,
            BattleMode::Team => split_damage(damage, targets.len()),
        };

        let mut hits = Vec::new();
        for i in targets {
            if let Some(member) = state.members.get_mut(i) {
                let taken = take_damage(member, share);
                hits.push((member.name.clone(), taken));
                if member.is_downed() {
                    let line = format!("{} is downed!", member.name);
                    self.note(line);
                }
            }
        }
        self.note(format!(
            "Wrong! {} strikes for {} damage.",
            self.monster.name, damage
        ));

        let party_downed = self.all_relevant_downed(state);
        if party_downed {
            self.phase = BattlePhase::PartyDowned;
            self.note("The party can no longer fight.".to_string());
        }
        TurnOutcome::PartyHit { hits, party_downed }
    }

    fn pay_victory<R: Rng>(
        &mut self,
        state: &mut GameState,
        catalog: &Catalog,
        rng: &mut R,
    ) -> VictoryPayout {
        let recipients = self.relevant_members(state);
        let exp_each = match self.mode {
            BattleMode::Single { .. } => self.monster.exp,
            BattleMode::Team => split_exp(self.monster.exp, recipients.len()),
        };

        let mut payout = VictoryPayout {
            exp_each,
            gold: self.monster.gold,
            ..Default::default()
        };
        for i in recipients {
            if let Some(member) = state.members.get_mut(i) {
                member.exp += exp_each;
                if settle_level_ups(member) > 0 {
                    payout.level_ups.push((member.name.clone(), member.level));
                    self.events.push(GameEvent::LevelUp {
                        name: member.name.clone(),
                        level: member.level,
                    });
                }
                payout.recipients.push(member.name.clone());
            }
        }
        state.team_gold += self.monster.gold;

        if roll_drop(rng.gen::<f64>()) {
            payout.drop = drop_equipment(state, catalog, rng);
        }

        record_defeat(&mut state.quests);
        update_progress(&mut state.quests, &state.members);

        self.phase = BattlePhase::Victory;
        self.events.push(GameEvent::Victory);
        self.note(format!(
            "{} is defeated! +{} EXP each, +{} gold.",
            self.monster.name, exp_each, self.monster.gold
        ));
        for (name, level) in payout.level_ups.clone() {
            self.note(format!("{} reached level {}!", name, level));
        }
        if let Some(drop) = payout.drop.clone() {
            self.note(format!("{} found {}!", drop.recipient, drop.item));
            self.events.push(GameEvent::ItemDropped {
                item: drop.item,
                recipient: drop.recipient,
            });
        }
        tracing::info!(
            monster = %self.monster.name,
            turns = self.turns,
            exp_each,
            gold = self.monster.gold,
            "battle won"
        );
        payout
    }

    /// Try to escape. Allowed any time before the battle is decided.
    pub fn attempt_flee<R: Rng>(
        &mut self,
        state: &mut GameState,
        rng: &mut R,
    ) -> Result<FleeOutcome, GameError> {
        let roll = rng.gen::<f64>();
        self.flee_with_roll(state, roll, rng)
    }

    /// Escape using a pre-drawn roll; `rng` only picks who gets hit on failure.
    pub fn flee_with_roll<R: Rng>(
        &mut self,
        state: &mut GameState,
        roll: f64,
        rng: &mut R,
    ) -> Result<FleeOutcome, GameError> {
        self.expect_phase(
            &[
                BattlePhase::AwaitingStart,
                BattlePhase::QuestionActive,
                BattlePhase::FleeFailed,
            ],
            "flee",
        )?;
        self.question = None;

        if resolve_flee(roll) || state.members.is_empty() {
            self.phase = BattlePhase::Fled;
            self.note("The party escaped safely.".to_string());
            return Ok(FleeOutcome::Escaped);
        }

        let damage = wrong_answer_damage(self.monster.attack);
        let index = rng.gen_range(0..state.members.len());
        let member = &mut state.members[index];
        let taken = take_damage(member, damage);
        let name = member.name.clone();
        self.phase = BattlePhase::FleeFailed;
        self.note(format!(
            "Escape failed! {} hits {} for {} damage.",
            self.monster.name, name, taken
        ));
        Ok(FleeOutcome::Failed {
            member: name,
            damage: taken,
        })
    }

    /// Return to the question loop after a failed escape.
    pub fn continue_after_flee(&mut self, state: &GameState) -> Result<BattlePhase, GameError> {
        self.expect_phase(&[BattlePhase::FleeFailed], "continue")?;
        self.phase = if self.all_relevant_downed(state) {
            BattlePhase::PartyDowned
        } else {
            BattlePhase::QuestionActive
        };
        Ok(self.phase)
    }

    /// Revival is only offered while downed and affordable.
    pub fn can_revive(&self, state: &GameState) -> bool {
        self.phase == BattlePhase::PartyDowned && state.team_gold >= REVIVE_COST
    }

    /// Pay to bring the downed fighters back to half health and keep fighting.
    /// Single mode revives only the chosen member; team mode the whole party.
    /// Returns the names revived.
    pub fn revive(&mut self, state: &mut GameState) -> Result<Vec<String>, GameError> {
        self.expect_phase(&[BattlePhase::PartyDowned], "revive")?;
        state.spend_gold(REVIVE_COST)?;
        let mut revived = Vec::new();
        for index in self.relevant_members(state) {
            let Some(member) = state.members.get_mut(index) else {
                continue;
            };
            if member.is_downed() {
                revive(member, REVIVE_HEALTH_FRACTION);
                revived.push(member.name.clone());
            }
        }
        self.phase = BattlePhase::QuestionActive;
        self.note(format!(
            "Paid {} gold to revive {}.",
            REVIVE_COST,
            revived.join(", ")
        ));
        Ok(revived)
    }

    /// Give up while downed.
    pub fn exit_battle(&mut self) -> Result<(), GameError> {
        self.expect_phase(&[BattlePhase::PartyDowned], "leave")?;
        self.phase = BattlePhase::Defeat;
        self.question = None;
        self.note("The party retreats to recover.".to_string());
        tracing::info!(monster = %self.monster.name, "battle lost");
        Ok(())
    }
}

/// Give a random member one random item the party is ready for.
fn drop_equipment<R: Rng>(
    state: &mut GameState,
    catalog: &Catalog,
    rng: &mut R,
) -> Option<ItemDrop> {
    if state.members.is_empty() {
        return None;
    }
    let pool = catalog.equipment_for_level(state.max_level());
    if pool.is_empty() {
        return None;
    }
    let item = pool[rng.gen_range(0..pool.len())].to_string();
    let index = rng.gen_range(0..state.members.len());
    let member = &mut state.members[index];
    member.inventory.push(item.clone());
    Some(ItemDrop {
        item,
        recipient: member.name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EquipmentDef, MonsterDef};
    use crate::character::EquipmentSlot;
    use crate::quiz::LevelPool;
    use crate::quiz::Track;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn monster(attack: u32, defense: u32, health: u32) -> Monster {
        Monster {
            name: "Slime".into(),
            level: 1,
            health,
            max_health: health,
            attack,
            defense,
            exp: 50,
            gold: 20,
            image: String::new(),
        }
    }

    fn catalog_with_question() -> Catalog {
        let mut catalog = Catalog::default();
        let mut pool = LevelPool::new();
        pool.insert(
            1,
            vec![Question {
                question: "2 + 2?".into(),
                options: vec!["A. 3".into(), "B. 4".into(), "C. 5".into(), "D. 22".into()],
                answer: "B".into(),
            }],
        );
        catalog.questions.insert_track(Track::Python, pool);
        catalog
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_flee_roll_boundary() {
        assert!(resolve_flee(0.2));
        assert!(resolve_flee(0.99));
        assert!(!resolve_flee(0.19));
        assert!(!resolve_flee(0.0));
    }

    #[test]
    fn test_roll_drop_boundary() {
        assert!(roll_drop(0.29));
        assert!(!roll_drop(0.3));
    }

    #[test]
    fn test_generate_encounter_rolls_within_ranges() {
        let mut catalog = Catalog::default();
        catalog.monsters.insert(
            "Wolf".into(),
            MonsterDef {
                level: 3,
                health_range: [30, 40],
                attack_range: [12, 15],
                defense_range: [1, 3],
                exp: 40,
                gold: 15,
                image: String::new(),
            },
        );
        let maps = crate::catalog::default_maps();
        let mut rng = rng();
        for _ in 0..20 {
            let m = generate_encounter(&catalog, &maps[0], &mut rng).unwrap();
            assert_eq!(m.health, m.max_health);
            assert!((30..=40).contains(&m.health));
            assert!((12..=15).contains(&m.attack));
            assert!((1..=3).contains(&m.defense));
        }
        assert!(matches!(
            generate_encounter(&catalog, &maps[1], &mut rng),
            Err(GameError::NoMonsterForMap { min: 6, max: 10 })
        ));
    }

    #[test]
    fn test_answer_before_start_is_refused() {
        let mut state = GameState::new("t");
        let mut battle = Battle::new(monster(14, 0, 50), "Windswept Plains");
        let err = battle
            .submit_answer(&mut state, &Catalog::default(), Some("B"), &mut rng())
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidBattleAction { .. }));
    }

    #[test]
    fn test_correct_answer_hits_monster() {
        let catalog = catalog_with_question();
        let mut state = GameState::new("t");
        state.members[0].level = 3;
        let mut battle = Battle::new(monster(14, 5, 50), "Windswept Plains");
        battle.start_single(&state, 0).unwrap();
        let mut rng = rng();
        battle.prepare_question(&state, &catalog, &mut rng).unwrap();
        let outcome = battle
            .submit_answer(&mut state, &catalog, Some("B"), &mut rng)
            .unwrap();
        assert_eq!(
            outcome,
            TurnOutcome::MonsterHit {
                damage: 11,
                remaining: 39
            }
        );
        assert_eq!(battle.phase(), BattlePhase::QuestionActive);
    }

    #[test]
    fn test_wrong_answer_hits_selected_member() {
        let catalog = catalog_with_question();
        let mut state = GameState::new("t");
        let mut battle = Battle::new(monster(14, 0, 50), "Windswept Plains");
        battle.start_single(&state, 1).unwrap();
        let mut rng = rng();
        battle.prepare_question(&state, &catalog, &mut rng).unwrap();
        battle
            .submit_answer(&mut state, &catalog, Some("A"), &mut rng)
            .unwrap();
        assert_eq!(state.members[0].health, 100);
        assert_eq!(state.members[1].health, 96);
    }

    #[test]
    fn test_team_damage_split_rounds_up() {
        let catalog = catalog_with_question();
        let mut state = GameState::new("t");
        let mut battle = Battle::new(monster(17, 0, 50), "Windswept Plains");
        battle.start_team(&state).unwrap();
        battle
            .submit_answer(&mut state, &catalog, None, &mut rng())
            .unwrap();
        // 7 damage split over 2 members
        assert!(state.members.iter().all(|m| m.health == 96));
    }

    #[test]
    fn test_missing_question_counts_as_wrong() {
        let catalog = Catalog::default();
        let mut state = GameState::new("t");
        let mut battle = Battle::new(monster(14, 0, 50), "Windswept Plains");
        battle.start_single(&state, 0).unwrap();
        let mut rng = rng();
        assert!(battle.prepare_question(&state, &catalog, &mut rng).is_err());
        let outcome = battle
            .submit_answer(&mut state, &catalog, Some("B"), &mut rng)
            .unwrap();
        assert!(matches!(outcome, TurnOutcome::PartyHit { .. }));
        assert_eq!(state.members[0].health, 96);
    }

    #[test]
    fn test_party_downed_then_revive() {
        let catalog = catalog_with_question();
        let mut state = GameState::new("t");
        state.members[0].health = 3;
        let mut battle = Battle::new(monster(14, 0, 50), "Windswept Plains");
        battle.start_single(&state, 0).unwrap();
        let outcome = battle
            .submit_answer(&mut state, &catalog, None, &mut rng())
            .unwrap();
        assert!(matches!(
            outcome,
            TurnOutcome::PartyHit {
                party_downed: true,
                ..
            }
        ));
        assert_eq!(battle.phase(), BattlePhase::PartyDowned);
        assert!(battle.can_revive(&state));

        let revived = battle.revive(&mut state).unwrap();
        assert_eq!(revived, vec!["Beginner".to_string()]);
        assert_eq!(state.members[0].health, 50);
        assert_eq!(state.team_gold, 70);
        assert_eq!(battle.phase(), BattlePhase::QuestionActive);
    }

    #[test]
    fn test_single_revive_leaves_bystanders_down() {
        let mut state = GameState::new("t");
        for member in &mut state.members {
            member.health = 0;
        }
        let mut battle = Battle::new(monster(14, 0, 50), "Windswept Plains");
        battle.start_single(&state, 0).unwrap();
        assert_eq!(battle.phase(), BattlePhase::PartyDowned);

        let revived = battle.revive(&mut state).unwrap();
        assert_eq!(revived, vec!["Beginner".to_string()]);
        assert_eq!(state.members[0].health, 50);
        assert_eq!(state.members[1].health, 0);
        assert_eq!(state.team_gold, 70);
    }

    #[test]
    fn test_team_revive_restores_whole_party() {
        let mut state = GameState::new("t");
        for member in &mut state.members {
            member.health = 0;
        }
        let mut battle = Battle::new(monster(14, 0, 50), "Windswept Plains");
        battle.start_team(&state).unwrap();
        assert_eq!(battle.phase(), BattlePhase::PartyDowned);

        let revived = battle.revive(&mut state).unwrap();
        assert_eq!(revived.len(), 2);
        assert!(state.members.iter().all(|m| m.health == 50));
        assert_eq!(state.team_gold, 70);
    }

    #[test]
    fn test_victory_drop_comes_from_ready_gear() {
        let mut catalog = catalog_with_question();
        for (name, difficulty) in [("Stick", 1), ("Dragon Blade", 20)] {
            catalog.equipment.insert(
                name.into(),
                EquipmentDef {
                    attack: 1,
                    defense: 0,
                    part: EquipmentSlot::Weapon,
                    difficulty,
                    shop_price: 10,
                    image: String::new(),
                },
            );
        }

        let mut drops = 0;
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut state = GameState::new("t");
            let bags_before: Vec<usize> = state.members.iter().map(|m| m.inventory.len()).collect();
            let mut battle = Battle::new(monster(14, 0, 1), "Windswept Plains");
            battle.start_team(&state).unwrap();
            battle.prepare_question(&state, &catalog, &mut rng).unwrap();
            let TurnOutcome::MonsterDefeated { payout, .. } = battle
                .submit_answer(&mut state, &catalog, Some("B"), &mut rng)
                .unwrap()
            else {
                panic!("one-HP monster should fall");
            };
            let events = battle.drain_events();
            let grown: Vec<usize> = state
                .members
                .iter()
                .zip(&bags_before)
                .filter(|(m, before)| m.inventory.len() != **before)
                .map(|(m, before)| m.inventory.len() - before)
                .collect();

            match payout.drop {
                Some(drop) => {
                    drops += 1;
                    assert_eq!(drop.item, "Stick");
                    assert_eq!(grown, vec![1]);
                    let recipient = state
                        .members
                        .iter()
                        .find(|m| m.name == drop.recipient)
                        .unwrap();
                    assert_eq!(recipient.inventory.last().map(String::as_str), Some("Stick"));
                    assert!(events.contains(&GameEvent::ItemDropped {
                        item: drop.item.clone(),
                        recipient: drop.recipient.clone(),
                    }));
                }
                None => {
                    assert!(grown.is_empty());
                    assert!(!events
                        .iter()
                        .any(|e| matches!(e, GameEvent::ItemDropped { .. })));
                }
            }
            assert!(state.members.iter().all(|m| !m.owns("Dragon Blade")));
        }
        assert!(drops > 0, "no seed produced a drop");
    }

    #[test]
    fn test_revive_blocked_without_gold() {
        let mut state = GameState::new("t");
        state.team_gold = 29;
        state.members[0].health = 0;
        let mut battle = Battle::new(monster(14, 0, 50), "Windswept Plains");
        battle.start_single(&state, 0).unwrap();
        assert_eq!(battle.phase(), BattlePhase::PartyDowned);
        assert!(!battle.can_revive(&state));
        assert!(battle.revive(&mut state).is_err());
        assert_eq!(state.team_gold, 29);
        battle.exit_battle().unwrap();
        assert_eq!(battle.outcome(), Some(BattleOutcome::Defeat));
    }

    #[test]
    fn test_failed_flee_hits_one_member() {
        let mut state = GameState::new("t");
        let mut battle = Battle::new(monster(14, 0, 50), "Windswept Plains");
        battle.start_single(&state, 0).unwrap();
        let outcome = battle.flee_with_roll(&mut state, 0.1, &mut rng()).unwrap();
        let FleeOutcome::Failed { damage, .. } = outcome else {
            panic!("expected failure");
        };
        assert_eq!(damage, 4);
        let total: u32 = state.members.iter().map(|m| m.health).sum();
        assert_eq!(total, 196);
        assert_eq!(battle.phase(), BattlePhase::FleeFailed);
        assert_eq!(
            battle.continue_after_flee(&state).unwrap(),
            BattlePhase::QuestionActive
        );
    }

    #[test]
    fn test_successful_flee_ends_battle() {
        let mut state = GameState::new("t");
        let before = state.clone();
        let mut battle = Battle::new(monster(14, 0, 50), "Windswept Plains");
        let outcome = battle.flee_with_roll(&mut state, 0.5, &mut rng()).unwrap();
        assert_eq!(outcome, FleeOutcome::Escaped);
        assert_eq!(battle.outcome(), Some(BattleOutcome::Fled));
        assert_eq!(state, before);
    }

    #[test]
    fn test_question_level_capped() {
        let mut state = GameState::new("t");
        state.members[0].level = 9;
        state.members[1].level = 4;
        let mut battle = Battle::new(monster(1, 0, 10), "Windswept Plains");
        battle.start_single(&state, 1).unwrap();
        assert_eq!(battle.question_level(&state), 4);

        let mut team = Battle::new(monster(1, 0, 10), "Windswept Plains");
        team.start_team(&state).unwrap();
        assert_eq!(team.question_level(&state), 6);
    }
}
