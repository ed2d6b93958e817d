// Progression
pub const EXP_PER_LEVEL: u64 = 100;
pub const HEALTH_PER_LEVEL: u32 = 100;
pub const STARTING_TEAM_GOLD: u64 = 100;

// Damage
pub const BASE_ATTACK: u32 = 7;
pub const ATTACK_PER_LEVEL: u32 = 3;
pub const BASE_DEFENSE: u32 = 10;
/// Flat defense subtracted from a monster's attack on a wrong answer.
pub const PARTY_FLAT_DEFENSE: u32 = 10;
pub const MIN_DAMAGE: u32 = 1;

// Battle
pub const FLEE_FAIL_CHANCE: f64 = 0.2;
pub const REVIVE_COST: u64 = 30;
pub const REVIVE_HEALTH_FRACTION: f64 = 0.5;
pub const EQUIPMENT_DROP_CHANCE: f64 = 0.3;
pub const MAX_QUESTION_LEVEL: u32 = 6;

// Quiz
pub const QUESTION_TIME_LIMIT_SECS: u64 = 30;
pub const FALLBACK_QUESTION_LEVEL: u32 = 1;
pub const DEFAULT_CHOICE_KEYS: [&str; 4] = ["A", "B", "C", "D"];

// Enhancement: cost(level) = floor(BASE * RATE^level), stat = floor(base * (1 + level * BONUS))
pub const ENHANCE_BASE_COST: f64 = 50.0;
pub const ENHANCE_COST_RATE: f64 = 1.5;
pub const ENHANCE_BONUS_PER_LEVEL: f64 = 0.1;

// Shop
pub const SHOP_DISCOUNT: f64 = 0.9;
/// Equipment is stocked up to this multiple of the party's max level.
pub const SHOP_DIFFICULTY_FACTOR: f64 = 1.5;
pub const POTION_NAME: &str = "Healing Potion";
pub const POTION_PRICE: u64 = 10;
pub const POTION_HEAL: u32 = 100;

// Quests
pub const DAILY_QUEST_COUNT: usize = 3;
pub const DEFEAT_QUEST_EXTRA_MIN: u32 = 3;
pub const DEFEAT_QUEST_EXTRA_MAX: u32 = 7;
pub const COLLECT_QUEST_MIN: u32 = 1;
pub const COLLECT_QUEST_MAX: u32 = 3;
/// Base (exp, gold) per quest kind, multiplied by the party max level.
pub const DEFEAT_QUEST_REWARD: (u64, u64) = (30, 50);
pub const LEVEL_QUEST_REWARD: (u64, u64) = (50, 100);
pub const COLLECT_QUEST_REWARD: (u64, u64) = (20, 80);

// Session
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 300;
pub const PACING_DELAY_MS: u64 = 1000;
