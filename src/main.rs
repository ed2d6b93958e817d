//! Terminal front end for the QuizQuest engine.
//!
//! Usage:
//!   quizquest [--save NAME] [--data DIR] [--time-limit SECS] [--seed N] [--no-autosave]
//!   quizquest --list-saves
//!   quizquest --version

use chrono::Local;
use crossterm::style::Stylize;
use quizquest::battle::{BattleMode, BattlePhase, FleeOutcome, TurnOutcome};
use quizquest::build_info;
use quizquest::catalog::load_catalog;
use quizquest::character::EquipmentSlot;
use quizquest::core::{GameConfig, GameEvent, NotificationLevel, Scene};
use quizquest::enhancement::{enhancement_cost, enhancement_prefix};
use quizquest::persistence::{FileStore, SaveManager};
use quizquest::quiz::{format_prompt, PromptSegment, QuestionTimer, Submission, Track};
use quizquest::{Game, GameError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::error::Error;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::{interval, sleep, Duration, MissedTickBehavior};
use tracing_subscriber::EnvFilter;

type Input = Lines<BufReader<Stdin>>;

struct Options {
    save: String,
    data: Option<PathBuf>,
    time_limit: Option<u64>,
    seed: Option<u64>,
    no_autosave: bool,
    list_saves: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        save: "default".to_string(),
        data: None,
        time_limit: None,
        seed: None,
        no_autosave: false,
        list_saves: false,
    };

    let mut i = 1;
    while i < args.len() {
        let value = |i: usize| {
            args.get(i + 1)
                .cloned()
                .ok_or_else(|| format!("{} needs a value", args[i]))
        };
        match args[i].as_str() {
            "-s" | "--save" => {
                options.save = value(i)?;
                i += 1;
            }
            "-d" | "--data" => {
                options.data = Some(PathBuf::from(value(i)?));
                i += 1;
            }
            "-t" | "--time-limit" => {
                options.time_limit = Some(value(i)?.parse().map_err(|_| "invalid time limit")?);
                i += 1;
            }
            "--seed" => {
                options.seed = Some(value(i)?.parse().map_err(|_| "invalid seed")?);
                i += 1;
            }
            "--no-autosave" => options.no_autosave = true,
            "--list-saves" => options.list_saves = true,
            "-v" | "--version" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "-h" | "--help" => {
                println!("QuizQuest - answer programming questions, win battles\n");
                println!("Usage: quizquest [OPTIONS]\n");
                println!("  -s, --save NAME        Save slot to play (default: default)");
                println!("  -d, --data DIR         Catalog directory (equipment, monsters, questions)");
                println!("  -t, --time-limit SECS  Seconds per question");
                println!("      --seed N           Fixed random seed");
                println!("      --no-autosave      Only save on battle end and purchases");
                println!("      --list-saves       Print existing saves and exit");
                println!("  -v, --version          Show version");
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(options)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizquest=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args)?;

    let config_path = GameConfig::default_path()?;
    let mut config = GameConfig::load_from(&config_path);
    if let Some(dir) = options.data {
        config.catalog_dir = dir;
    }
    if let Some(secs) = options.time_limit {
        config.question_time_limit_secs = secs;
    }
    if options.no_autosave {
        config.auto_save = false;
    }

    let store = FileStore::open_default()?;
    if options.list_saves {
        for save in SaveManager::new(store).list_saves()? {
            println!("{}", save);
        }
        return Ok(());
    }

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let catalog = load_catalog(&config.catalog_dir);
    let mut game = Game::open(catalog, store, &options.save)?;
    game.refresh_quests(Local::now().date_naive(), &mut rng)?;
    print_events(&mut game);

    let mut input: Input = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", format!("Welcome to QuizQuest! Save: {}", options.save).bold());

    let result = main_menu(&mut game, &config, &mut input, &mut rng).await;
    game.save()?;
    println!("Progress saved. Goodbye!");
    result
}

async fn main_menu(
    game: &mut Game<FileStore>,
    config: &GameConfig,
    input: &mut Input,
    rng: &mut StdRng,
) -> Result<(), Box<dyn Error>> {
    let mut autosave = interval(config.autosave_interval());
    autosave.set_missed_tick_behavior(MissedTickBehavior::Delay);
    autosave.tick().await;

    loop {
        game.change_scene(Scene::MapSelect);
        print_events(game);
        println!();
        println!(
            "{}",
            "[s]tatus  [f]ight  s[h]op  [q]uests  [e]quip  e[n]hance  [l]anguage  e[x]it".cyan()
        );
        let line = tokio::select! {
            line = input.next_line() => line?,
            _ = autosave.tick() => {
                if config.auto_save {
                    game.save()?;
                    tracing::debug!("autosaved");
                }
                continue;
            }
        };
        let Some(line) = line else {
            return Ok(());
        };
        let outcome = match line.trim() {
            "s" => {
                show_status(game);
                Ok(())
            }
            "f" => fight(game, config, input, rng).await,
            "h" => shop(game, input).await,
            "q" => quests(game, input, rng).await,
            "e" => equipment(game, input).await,
            "n" => enhance(game, input).await,
            "l" => language(game, input).await,
            "x" => return Ok(()),
            "" => Ok(()),
            other => {
                println!("Unknown command: {}", other);
                Ok(())
            }
        };
        match outcome {
            Ok(()) => {}
            Err(MenuError::Game(err)) if err.is_refusal() => println!("{}", err.to_string().yellow()),
            Err(MenuError::Game(err)) => return Err(err.into()),
            Err(MenuError::InputClosed) => return Ok(()),
            Err(MenuError::Io(err)) => return Err(err.into()),
        }
    }
}

#[derive(Debug)]
enum MenuError {
    Game(GameError),
    Io(std::io::Error),
    InputClosed,
}

impl From<GameError> for MenuError {
    fn from(err: GameError) -> Self {
        MenuError::Game(err)
    }
}

impl From<std::io::Error> for MenuError {
    fn from(err: std::io::Error) -> Self {
        MenuError::Io(err)
    }
}

async fn prompt(input: &mut Input, label: &str) -> Result<String, MenuError> {
    println!("{}", label.dark_grey());
    match input.next_line().await? {
        Some(line) => Ok(line.trim().to_string()),
        None => Err(MenuError::InputClosed),
    }
}

async fn pick_member(game: &Game<FileStore>, input: &mut Input) -> Result<Option<usize>, MenuError> {
    for (i, member) in game.state().members.iter().enumerate() {
        println!(
            "  {}) {} Lv{} HP {}/{}",
            i + 1,
            member.name,
            member.level,
            member.health,
            member.max_health
        );
    }
    let answer = prompt(input, "Choose a member (blank to cancel):").await?;
    Ok(answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .filter(|&i| i < game.state().members.len()))
}

fn print_events(game: &mut Game<FileStore>) {
    for event in game.drain_events() {
        match event {
            GameEvent::Notification { level, message } => match level {
                NotificationLevel::Info => println!("{}", message),
                NotificationLevel::Warning => println!("{}", message.yellow()),
                NotificationLevel::Error => println!("{}", message.red()),
            },
            GameEvent::LevelUp { name, level } => {
                println!("{}", format!("{} reached level {}!", name, level).green().bold())
            }
            GameEvent::ItemDropped { item, recipient } => {
                println!("{}", format!("{} found {}!", recipient, item).magenta())
            }
            GameEvent::PurchaseSuccess { item } => println!("{}", format!("Bought {}.", item).green()),
            GameEvent::DataLoaded { failures } if failures > 0 => {
                println!("{}", "Some game data failed to load.".red())
            }
            _ => {}
        }
    }
}

fn show_status(game: &Game<FileStore>) {
    let state = game.state();
    println!(
        "{}",
        format!("Team gold: {}   Track: {}", state.team_gold, state.track.display_name()).bold()
    );
    for (i, member) in state.members.iter().enumerate() {
        println!(
            "{} Lv{}  EXP {}/{}  HP {}/{}",
            member.name.clone().bold(),
            member.level,
            member.exp,
            quizquest::character::required_exp(member.level),
            member.health,
            member.max_health
        );
        if let Ok(stats) = game.stats(i) {
            println!(
                "  ATK {} (+{})  DEF {} (+{})",
                stats.total_attack(),
                stats.equipment_attack,
                stats.total_defense(),
                stats.equipment_defense
            );
        }
        for (slot, item) in member.equipped.iter_equipped() {
            let level = state.enhancements.level(item);
            println!("  {:<7} {}{}", slot.name(), enhancement_prefix(level), item);
        }
        if !member.inventory.is_empty() {
            println!("  bag: {}", member.inventory.join(", "));
        }
    }
}

fn print_question(prompt_text: &str, choices: &[(String, String)], limit: Duration) {
    for segment in format_prompt(prompt_text) {
        match segment {
            PromptSegment::Text(text) => println!("{}", text.trim().bold()),
            PromptSegment::Code(code) => {
                for line in code.lines() {
                    println!("    {}", line.yellow());
                }
            }
        }
    }
    for (key, label) in choices {
        if key == label {
            println!("  [{}]", key);
        } else {
            println!("  {}", label);
        }
    }
    println!(
        "{}",
        format!("{}s to answer. Type 'flee' to run.", limit.as_secs()).dark_grey()
    );
}

async fn fight(
    game: &mut Game<FileStore>,
    config: &GameConfig,
    input: &mut Input,
    rng: &mut StdRng,
) -> Result<(), MenuError> {
    let maps: Vec<_> = game.catalog().maps.clone();
    for (i, map) in maps.iter().enumerate() {
        println!(
            "  {}) {} (Lv {}-{}) {}",
            i + 1,
            map.name,
            map.level_range[0],
            map.level_range[1],
            map.description.clone().dark_grey()
        );
    }
    let choice = prompt(input, "Choose a map:").await?;
    let Some(map) = choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| maps.get(i))
    else {
        return Ok(());
    };

    let battle = game.enter_map(&map.name, rng)?;
    if let Some(line) = battle.log().last() {
        println!("{}", line.clone().red().bold());
    }

    let answer = prompt(input, "Fight with one member (number) or the whole team (t)?").await?;
    let mode = if answer.eq_ignore_ascii_case("t") {
        BattleMode::Team
    } else {
        let index = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .unwrap_or(0);
        BattleMode::Single { member: index }
    };
    if let Err(err) = game.start_battle(mode) {
        game.abandon_battle()?;
        return Err(err.into());
    }

    loop {
        print_events(game);
        let Some(phase) = game.battle().map(|b| b.phase()) else {
            return Ok(());
        };
        match phase {
            BattlePhase::AwaitingStart => {
                game.abandon_battle()?;
                return Ok(());
            }
            BattlePhase::QuestionActive => ask_question(game, config, input, rng).await?,
            BattlePhase::FleeFailed => {
                let answer = prompt(input, "[c]ontinue fighting or [f]lee again?").await?;
                if answer.eq_ignore_ascii_case("f") {
                    flee(game, rng)?;
                } else {
                    game.continue_battle()?;
                }
            }
            BattlePhase::PartyDowned => {
                let label = if game.can_revive() {
                    "The party is down! [r]evive for 30 gold or [l]eave?"
                } else {
                    "The party is down and cannot afford revival. [l]eave"
                };
                let answer = prompt(input, label).await?;
                if answer.eq_ignore_ascii_case("r") && game.can_revive() {
                    let revived = game.revive()?;
                    println!("{}", format!("Revived {}.", revived.join(", ")).green());
                } else {
                    game.exit_battle()?;
                    println!("{}", "The party retreats.".red());
                }
            }
            BattlePhase::Victory | BattlePhase::Defeat | BattlePhase::Fled => {
                print_events(game);
                game.dismiss_battle();
                return Ok(());
            }
        }
    }
}

fn flee(game: &mut Game<FileStore>, rng: &mut StdRng) -> Result<(), MenuError> {
    match game.flee(rng)? {
        FleeOutcome::Escaped => println!("{}", "You escaped!".green()),
        FleeOutcome::Failed { member, damage } => println!(
            "{}",
            format!("Escape failed! {} takes {} damage.", member, damage).red()
        ),
    }
    Ok(())
}

async fn ask_question(
    game: &mut Game<FileStore>,
    config: &GameConfig,
    input: &mut Input,
    rng: &mut StdRng,
) -> Result<(), MenuError> {
    let submission = match game.next_question(rng)? {
        Some(question) => {
            let choices: Vec<_> = question
                .choices()
                .into_iter()
                .map(|c| (c.key, c.label))
                .collect();
            let limit = config.question_time_limit();
            print_question(&question.question, &choices, limit);
            let timer = QuestionTimer::start(limit);
            timer
                .await_answer(async { input.next_line().await.ok().flatten() })
                .await
        }
        None => Submission::TimedOut,
    };

    let answer = match &submission {
        Submission::Cancelled => return Err(MenuError::InputClosed),
        Submission::Answered(text) if text.eq_ignore_ascii_case("flee") => {
            return flee(game, rng);
        }
        Submission::Answered(text) => Some(text.to_ascii_uppercase()),
        Submission::TimedOut => None,
    };

    match game.answer(answer.as_deref(), rng)? {
        TurnOutcome::MonsterHit { damage, remaining } => println!(
            "{}",
            format!("Correct! {} damage, {} HP left.", damage, remaining).green()
        ),
        TurnOutcome::MonsterDefeated { damage, payout } => {
            println!("{}", format!("Correct! {} damage.", damage).green());
            println!(
                "{}",
                format!(
                    "Victory! {} EXP each for {}, +{} gold.",
                    payout.exp_each,
                    payout.recipients.join(", "),
                    payout.gold
                )
                .green()
                .bold()
            );
        }
        TurnOutcome::PartyHit { hits, .. } => {
            let label = if submission == Submission::TimedOut {
                "Time's up!"
            } else {
                "Wrong!"
            };
            for (name, damage) in hits {
                println!("{}", format!("{} {} takes {} damage.", label, name, damage).red());
            }
        }
    }
    sleep(config.pacing_delay()).await;
    Ok(())
}

async fn shop(game: &mut Game<FileStore>, input: &mut Input) -> Result<(), MenuError> {
    game.change_scene(Scene::Shop);
    let offers = game.shop_offers();
    println!("{}", format!("Team gold: {}", game.state().team_gold).bold());
    println!("  0) Healing Potion - 10 gold (heals 100)");
    for (i, offer) in offers.iter().enumerate() {
        println!(
            "  {}) {} [{}] ATK {} DEF {} - {} gold",
            i + 1,
            offer.item,
            offer.part,
            offer.attack,
            offer.defense,
            offer.price
        );
    }
    let choice = prompt(input, "Buy which item? (blank to leave)").await?;
    let Ok(choice) = choice.parse::<usize>() else {
        return Ok(());
    };
    let Some(member) = pick_member(game, input).await? else {
        return Ok(());
    };
    if choice == 0 {
        let receipt = game.buy_potion(member)?;
        println!("{} recovers {} HP.", receipt.member, receipt.healed.unwrap_or(0));
    } else if let Some(offer) = offers.get(choice - 1) {
        game.buy_equipment(&offer.item, member)?;
    }
    Ok(())
}

async fn quests(
    game: &mut Game<FileStore>,
    input: &mut Input,
    rng: &mut StdRng,
) -> Result<(), MenuError> {
    game.change_scene(Scene::Quests);
    game.refresh_quests(Local::now().date_naive(), rng)?;
    let board = game.state().quests.clone();
    for (i, quest) in board.quests.iter().enumerate() {
        let status = if quest.rewarded {
            "claimed".dark_grey()
        } else if quest.completed {
            "complete".green()
        } else {
            "in progress".yellow()
        };
        println!(
            "  {}) {} ({}/{}) - {} EXP, {} gold [{}]",
            i + 1,
            quest.description,
            quest.progress.min(quest.target),
            quest.target,
            quest.reward.exp,
            quest.reward.gold,
            status
        );
    }
    let choice = prompt(input, "Claim which quest? (blank to leave)").await?;
    let quest = choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| board.quests.get(i));
    if let Some(quest) = quest {
        let receipt = game.claim_quest(&quest.id)?;
        println!(
            "{}",
            format!("+{} gold, +{} EXP each.", receipt.gold, receipt.exp_each).green()
        );
    }
    Ok(())
}

async fn equipment(game: &mut Game<FileStore>, input: &mut Input) -> Result<(), MenuError> {
    game.change_scene(Scene::Equipment);
    let Some(member) = pick_member(game, input).await? else {
        return Ok(());
    };
    let character = game.state().member(member)?.clone();
    for (slot, item) in character.equipped.iter_equipped() {
        println!("  {:<7} {}", slot.name(), item);
    }
    println!("  bag: {}", character.inventory.join(", "));
    let command = prompt(
        input,
        "equip <item> | unequip <slot> | discard <item> (blank to leave)",
    )
    .await?;
    let (verb, arg) = command.split_once(' ').unwrap_or((command.as_str(), ""));
    match verb {
        "equip" => {
            if let Some(old) = game.equip(member, arg.trim())? {
                println!("{} returned to the bag.", old);
            }
        }
        "unequip" => match EquipmentSlot::parse(arg) {
            Some(slot) => {
                game.unequip(member, slot)?;
            }
            None => println!("Slots: weapon, armor, gloves, pants, shoes"),
        },
        "discard" => game.discard(member, arg.trim())?,
        _ => {}
    }
    Ok(())
}

async fn enhance(game: &mut Game<FileStore>, input: &mut Input) -> Result<(), MenuError> {
    game.change_scene(Scene::Enhancement);
    let mut items: Vec<String> = game
        .state()
        .members
        .iter()
        .flat_map(|m| {
            m.equipped
                .iter_equipped()
                .map(|(_, item)| item.to_string())
                .chain(m.inventory.iter().cloned())
        })
        .filter(|item| game.catalog().equipment(item).is_some())
        .collect();
    items.sort();
    items.dedup();

    println!("{}", format!("Team gold: {}", game.state().team_gold).bold());
    for (i, item) in items.iter().enumerate() {
        let level = game.state().enhancements.level(item);
        println!(
            "  {}) {}{} - next level costs {}",
            i + 1,
            enhancement_prefix(level),
            item,
            enhancement_cost(level)
        );
    }
    let choice = prompt(input, "Enhance which item? (blank to leave)").await?;
    if let Some(item) = choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| items.get(i))
    {
        let receipt = game.enhance(item)?;
        println!(
            "{}",
            format!("{} is now +{} ({} gold spent).", receipt.item, receipt.new_level, receipt.cost)
                .green()
        );
    }
    Ok(())
}

async fn language(game: &mut Game<FileStore>, input: &mut Input) -> Result<(), MenuError> {
    let answer = prompt(input, "Question track: python or cpp?").await?;
    match Track::parse(&answer) {
        Some(track) => {
            game.set_track(track)?;
            println!("Now answering {} questions.", track.display_name());
        }
        None => println!("Unknown track."),
    }
    Ok(())
}
