//! The engine facade.
//!
//! `Game` ties one save's [`GameState`] to the catalog and a durable store.
//! Every mutating call validates, mutates, then persists the keys it touched,
//! and queues the presentation events the change produced.

use crate::battle::{generate_encounter, Battle, BattleMode, BattlePhase, FleeOutcome, TurnOutcome};
use crate::catalog::{Catalog, CatalogLoad};
use crate::character::EquipmentSlot;
use crate::core::error::GameError;
use crate::core::events::{EventQueue, GameEvent, Scene};
use crate::core::game_state::GameState;
use crate::enhancement::{enhance, EnhanceReceipt};
use crate::equipment::{discard_item, equip, stats_overview, unequip, StatsOverview};
use crate::persistence::{KeyValueStore, SaveKey, SaveManager};
use crate::quests::{claim_reward, refresh_if_new_day, update_progress, ClaimReceipt};
use crate::quiz::{Question, Track};
use crate::shop::{buy_equipment, buy_potion, shop_offers, PurchaseReceipt, ShopOffer};
use chrono::NaiveDate;
use rand::Rng;

pub struct Game<S: KeyValueStore> {
    state: GameState,
    catalog: Catalog,
    saves: SaveManager<S>,
    events: EventQueue,
    battle: Option<Battle>,
}

impl<S: KeyValueStore> Game<S> {
    /// Load `save_name` from `store` (seeding defaults for missing parts).
    /// Catalog load failures become error notifications.
    pub fn open(load: CatalogLoad, store: S, save_name: &str) -> Result<Self, GameError> {
        let saves = SaveManager::new(store);
        let state = saves.load(save_name)?;
        let mut events = EventQueue::new();
        for failure in &load.failures {
            events.push(GameEvent::error(failure.to_string()));
        }
        events.push(GameEvent::DataLoaded {
            failures: load.failures.len(),
        });
        Ok(Self {
            state,
            catalog: load.catalog,
            saves,
            events,
            battle: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn saves(&self) -> &SaveManager<S> {
        &self.saves
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn change_scene(&mut self, scene: Scene) {
        self.events.push(GameEvent::SceneChanged(scene));
    }

    fn persist(&mut self, keys: &[SaveKey]) -> Result<(), GameError> {
        for key in keys {
            self.saves.save_key(&self.state, *key)?;
        }
        Ok(())
    }

    /// Persist every key.
    pub fn save(&mut self) -> Result<(), GameError> {
        self.saves.save(&self.state)?;
        Ok(())
    }

    pub fn set_track(&mut self, track: Track) -> Result<(), GameError> {
        self.state.track = track;
        self.persist(&[SaveKey::Language])
    }

    pub fn stats(&self, member: usize) -> Result<StatsOverview, GameError> {
        let character = self.state.member(member)?;
        Ok(stats_overview(character, &self.catalog, &self.state.enhancements))
    }

    // --- equipment ---

    pub fn equip(&mut self, member: usize, item: &str) -> Result<Option<String>, GameError> {
        let character = self.state.member_mut(member)?;
        let displaced = equip(character, &self.catalog, item)?;
        self.after_inventory_change()?;
        Ok(displaced)
    }

    pub fn unequip(&mut self, member: usize, slot: EquipmentSlot) -> Result<String, GameError> {
        let character = self.state.member_mut(member)?;
        let item = unequip(character, &self.catalog, slot)?;
        self.after_inventory_change()?;
        Ok(item)
    }

    pub fn discard(&mut self, member: usize, item: &str) -> Result<(), GameError> {
        discard_item(self.state.member_mut(member)?, item)?;
        self.after_inventory_change()
    }

    fn after_inventory_change(&mut self) -> Result<(), GameError> {
        update_progress(&mut self.state.quests, &self.state.members);
        self.persist(&[SaveKey::Party, SaveKey::Quests])
    }

    // --- economy ---

    /// Upgrade an item some member holds, equipped or in the bag.
    pub fn enhance(&mut self, item: &str) -> Result<EnhanceReceipt, GameError> {
        if self.catalog.equipment(item).is_some() && !self.state.holds(item) {
            return Err(GameError::not_owned(item));
        }
        let receipt = enhance(
            &mut self.state.enhancements,
            &mut self.state.team_gold,
            &self.catalog,
            item,
        )?;
        self.persist(&[SaveKey::TeamGold, SaveKey::Enhancements])?;
        Ok(receipt)
    }

    pub fn shop_offers(&self) -> Vec<ShopOffer> {
        shop_offers(&self.catalog, self.state.max_level())
    }

    pub fn buy_equipment(&mut self, item: &str, member: usize) -> Result<PurchaseReceipt, GameError> {
        let receipt = buy_equipment(&mut self.state, &self.catalog, item, member)?;
        update_progress(&mut self.state.quests, &self.state.members);
        self.persist(&[SaveKey::TeamGold, SaveKey::Party, SaveKey::Quests])?;
        self.events.push(GameEvent::PurchaseSuccess {
            item: receipt.item.clone(),
        });
        Ok(receipt)
    }

    pub fn buy_potion(&mut self, member: usize) -> Result<PurchaseReceipt, GameError> {
        let receipt = buy_potion(&mut self.state, member)?;
        self.persist(&[SaveKey::TeamGold, SaveKey::Party])?;
        self.events.push(GameEvent::PurchaseSuccess {
            item: receipt.item.clone(),
        });
        Ok(receipt)
    }

    // --- quests ---

    /// Regenerate the daily batch if `today` is a new day, then sync progress.
    pub fn refresh_quests<R: Rng>(&mut self, today: NaiveDate, rng: &mut R) -> Result<bool, GameError> {
        let regenerated = refresh_if_new_day(&mut self.state.quests, &self.state.members, today, rng);
        update_progress(&mut self.state.quests, &self.state.members);
        self.persist(&[SaveKey::Quests])?;
        Ok(regenerated)
    }

    pub fn claim_quest(&mut self, quest_id: &str) -> Result<ClaimReceipt, GameError> {
        let receipt = claim_reward(&mut self.state, quest_id)?;
        for name in &receipt.leveled_up {
            if let Some(member) = self.state.members.iter().find(|m| &m.name == name) {
                self.events.push(GameEvent::LevelUp {
                    name: name.clone(),
                    level: member.level,
                });
            }
        }
        // Level-ups can complete reach-level quests.
        update_progress(&mut self.state.quests, &self.state.members);
        self.persist(&[SaveKey::Quests, SaveKey::TeamGold, SaveKey::Party])?;
        Ok(receipt)
    }

    // --- battle ---

    fn active_battle(&mut self) -> Result<&mut Battle, GameError> {
        self.battle.as_mut().ok_or(GameError::InvalidBattleAction {
            action: "battle",
            phase: "no battle is running",
        })
    }

    fn forward_battle_events(&mut self) {
        if let Some(battle) = self.battle.as_mut() {
            self.events.extend(battle.drain_events());
        }
    }

    /// Generate an encounter on `map_name`. The battle waits for [`Game::start_battle`].
    pub fn enter_map<R: Rng>(&mut self, map_name: &str, rng: &mut R) -> Result<&Battle, GameError> {
        // An encounter nobody has started yet may be walked away from.
        if self
            .battle
            .as_ref()
            .is_some_and(|b| b.phase() != BattlePhase::AwaitingStart && !b.phase().is_over())
        {
            return Err(GameError::InvalidBattleAction {
                action: "enter a map",
                phase: "a battle is already running",
            });
        }
        let map = self
            .catalog
            .map(map_name)
            .ok_or_else(|| GameError::UnknownMap(map_name.to_string()))?;
        let monster = generate_encounter(&self.catalog, map, rng)?;
        let battle = Battle::new(monster, map_name);
        self.events.push(GameEvent::SceneChanged(Scene::Battle));
        Ok(self.battle.insert(battle))
    }

    pub fn start_battle(&mut self, mode: BattleMode) -> Result<BattlePhase, GameError> {
        let state = &self.state;
        let battle = self.battle.as_mut().ok_or(GameError::InvalidBattleAction {
            action: "start",
            phase: "no battle is running",
        })?;
        battle.start(state, mode)?;
        Ok(battle.phase())
    }

    /// Walk away from an encounter that was never started. Nothing is paid or lost.
    pub fn abandon_battle(&mut self) -> Result<(), GameError> {
        let phase = self.active_battle()?.phase();
        if phase != BattlePhase::AwaitingStart {
            return Err(GameError::InvalidBattleAction {
                action: "abandon",
                phase: phase.name(),
            });
        }
        self.battle = None;
        self.events.push(GameEvent::SceneChanged(Scene::MapSelect));
        Ok(())
    }

    /// Draw this turn's question. `Ok(None)` means none was available; submit
    /// anyway and the turn counts as wrong.
    pub fn next_question<R: Rng>(&mut self, rng: &mut R) -> Result<Option<Question>, GameError> {
        let state = &self.state;
        let catalog = &self.catalog;
        let battle = self.battle.as_mut().ok_or(GameError::InvalidBattleAction {
            action: "ask a question",
            phase: "no battle is running",
        })?;
        match battle.prepare_question(state, catalog, rng) {
            Ok(question) => Ok(Some(question.clone())),
            Err(GameError::NoQuestionAvailable { track, level }) => {
                self.events.push(GameEvent::error(format!(
                    "no {} questions available for level {}",
                    track.display_name(),
                    level
                )));
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Resolve the turn with the player's answer (`None` on timeout).
    pub fn answer<R: Rng>(&mut self, answer: Option<&str>, rng: &mut R) -> Result<TurnOutcome, GameError> {
        let battle = self.battle.as_mut().ok_or(GameError::InvalidBattleAction {
            action: "answer",
            phase: "no battle is running",
        })?;
        let outcome = battle.submit_answer(&mut self.state, &self.catalog, answer, rng)?;
        self.forward_battle_events();
        if matches!(outcome, TurnOutcome::MonsterDefeated { .. }) {
            self.finish_battle()?;
        }
        Ok(outcome)
    }

    pub fn flee<R: Rng>(&mut self, rng: &mut R) -> Result<FleeOutcome, GameError> {
        let battle = self.battle.as_mut().ok_or(GameError::InvalidBattleAction {
            action: "flee",
            phase: "no battle is running",
        })?;
        let outcome = battle.attempt_flee(&mut self.state, rng)?;
        self.forward_battle_events();
        if outcome == FleeOutcome::Escaped {
            self.finish_battle()?;
        }
        Ok(outcome)
    }

    pub fn continue_battle(&mut self) -> Result<BattlePhase, GameError> {
        let state = &self.state;
        let battle = self.battle.as_mut().ok_or(GameError::InvalidBattleAction {
            action: "continue",
            phase: "no battle is running",
        })?;
        battle.continue_after_flee(state)
    }

    pub fn can_revive(&self) -> bool {
        self.battle
            .as_ref()
            .is_some_and(|battle| battle.can_revive(&self.state))
    }

    pub fn revive(&mut self) -> Result<Vec<String>, GameError> {
        let battle = self.battle.as_mut().ok_or(GameError::InvalidBattleAction {
            action: "revive",
            phase: "no battle is running",
        })?;
        let revived = battle.revive(&mut self.state)?;
        self.persist(&[SaveKey::TeamGold, SaveKey::Party])?;
        Ok(revived)
    }

    /// Leave a battle the party can no longer fight.
    pub fn exit_battle(&mut self) -> Result<(), GameError> {
        self.active_battle()?.exit_battle()?;
        self.finish_battle()
    }

    /// Persist everything, announce the result and return to map selection.
    fn finish_battle(&mut self) -> Result<(), GameError> {
        let Some(outcome) = self.battle.as_ref().and_then(Battle::outcome) else {
            return Ok(());
        };
        self.events.push(GameEvent::BattleCompleted { outcome });
        self.events.push(GameEvent::SceneChanged(Scene::MapSelect));
        self.save()
    }

    /// Drop a finished battle, returning its log.
    pub fn dismiss_battle(&mut self) -> Option<Vec<String>> {
        if !self.battle.as_ref().is_some_and(|b| b.phase().is_over()) {
            return None;
        }
        self.battle.take().map(|battle| battle.log().to_vec())
    }
}
