use clap::Parser;
use food_pairing::{cli, config, datasets, error, export, loader, logging, picker, report};
use cli::{Cli, Commands};
use config::Config;
use error::{PairingAppError, Result};
use loader::cache::TableCache;
use loader::LoadOptions;
use pairing_common::{PairingMode, PairingResolver, PairingResult, PairingSource};
use std::path::{Path, PathBuf};

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // 설정 명령은 손상된 설정 파일을 고칠 수 있어야 한다
    let config = if matches!(cli.command, Commands::Config { .. }) {
        Config::load_or_default()
    } else {
        Config::load()?
    };

    match cli.command {
        Commands::Foods => {
            let (resolver, _) = open_resolver(&cli.dataset, &cli.drinks, &cli.mode, cli.no_cache, &config)?;
            let foods = resolver.list_foods();
            println!("🍽️  음식 {}개 ({} 모드)\n", foods.len(), resolver.mode());
            for (i, food) in foods.iter().enumerate() {
                println!("{:>4}. {}", i + 1, food);
            }
        }

        Commands::Query { ref food, random, top, json } => {
            let (resolver, _) = open_resolver(&cli.dataset, &cli.drinks, &cli.mode, cli.no_cache, &config)?;
            let mut result = resolve_query(&resolver, food.as_deref(), random)?;
            result.truncate(top.unwrap_or(config.top_n));

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", report::render_result(&result));
            }
        }

        Commands::Pick { top } => {
            let (resolver, _) = open_resolver(&cli.dataset, &cli.drinks, &cli.mode, cli.no_cache, &config)?;
            match picker::pick_food(&resolver)? {
                Some(food) => {
                    let mut result = resolver.query(&food)?;
                    result.truncate(top.unwrap_or(config.top_n));
                    println!();
                    println!("{}", report::render_result(&result));
                }
                None => println!("선택을 취소했습니다"),
            }
        }

        Commands::RandomPair => {
            let (resolver, _) = open_resolver(&cli.dataset, &cli.drinks, &cli.mode, cli.no_cache, &config)?;
            let (food, pair) = resolver.random_pair(&mut rand::thread_rng())?;
            println!("{}", report::render_pair(&food, &pair, resolver.scale().unit));
        }

        Commands::Export { ref food, random, ref format, ref output } => {
            println!("📄 food-pairing - 내보내기\n");

            println!("[1/2] 데이터 적재 중...");
            let (resolver, mode) = open_resolver(&cli.dataset, &cli.drinks, &cli.mode, cli.no_cache, &config)?;
            let result = resolve_query(&resolver, food.as_deref(), random)?;
            println!("✔ {} ({}개 음료)\n", result.food_name, result.ranked_pairs.len());

            println!("[2/2] 파일 생성 중...");
            export::export_result(&result, mode, format, output)?;

            println!("\n✅ 내보내기 완료");
        }

        Commands::Datasets { ref folder } => {
            let target = folder.clone().unwrap_or_else(|| PathBuf::from("."));
            println!("📂 데이터 파일 검색: {}\n", target.display());

            let found = datasets::scan_folder(&target)?;
            if found.is_empty() {
                return Err(PairingAppError::NoDatasetsFound(target.display().to_string()));
            }

            let mut cache = open_cache(&target, cli.no_cache, &config);
            for dataset in &found {
                match datasets::summarize(dataset, &mut cache) {
                    datasets::DatasetSummary::Loaded {
                        food_column,
                        score_columns,
                        strategy,
                        unit,
                        food_count,
                    } => {
                        println!("✔ {}", dataset.file_name);
                        println!("    음식 열: {} ({})", food_column, strategy);
                        println!("    점수 열: {}개 [{}]", score_columns.len(), score_columns.join(", "));
                        println!("    음식 수: {}, 단위: {:?}", food_count, unit);
                    }
                    datasets::DatasetSummary::Failed(reason) => {
                        println!("✘ {}", dataset.file_name);
                        println!("    {}", reason);
                    }
                }
            }
            persist_cache(&cache, &target, cli.no_cache, &config);
        }

        Commands::Cache { clear, ref folder, info } => {
            let target = match folder {
                Some(folder) => folder.clone(),
                None => cli
                    .dataset
                    .clone()
                    .or_else(|| config.dataset_path().ok())
                    .map(|path| dataset_folder(&path))
                    .unwrap_or_else(|| PathBuf::from(".")),
            };
            let cache_path = TableCache::cache_path(&target);

            if info || !clear {
                // 기본 동작은 정보 표시
                if cache_path.exists() {
                    let cache = TableCache::load(&target);
                    println!("캐시 정보:");
                    println!("  경로: {}", cache_path.display());
                    println!("  항목 수: {}", cache.len());
                    for (key, entry) in cache.entries() {
                        println!("    {} ({} bytes) {}", entry.file_name, entry.file_size, &key[..12.min(key.len())]);
                    }
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  크기: {} bytes", meta.len());
                    }
                } else {
                    println!("캐시 파일이 없습니다: {}", cache_path.display());
                }
            }

            if clear {
                match TableCache::clear(&target) {
                    Ok(true) => println!("✔ 캐시를 삭제했습니다: {}", cache_path.display()),
                    Ok(false) => println!("캐시 파일이 없습니다"),
                    Err(e) => println!("캐시 삭제 오류: {}", e),
                }
            }
        }

        Commands::Config { set_dataset, set_drinks, set_mode, show } => {
            let mut config = config;

            if let Some(path) = set_dataset {
                config.set_dataset(path)?;
                println!("✔ 점수표를 설정했습니다");
            }

            if let Some(path) = set_drinks {
                config.set_drink_dataset(path)?;
                println!("✔ 음료 프로필을 설정했습니다");
            }

            if let Some(mode) = set_mode {
                config.set_mode(mode)?;
                println!("✔ 모드를 설정했습니다: {}", mode);
            }

            if show {
                let describe = |path: &Option<PathBuf>| {
                    path.as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "미설정".to_string())
                };
                println!("설정:");
                println!("  점수표: {}", describe(&config.dataset));
                println!("  음료 프로필: {}", describe(&config.drink_dataset));
                println!("  모드: {}", config.mode);
                println!("  상위 N: {}", config.top_n);
                println!("  캐시: {}", if config.use_cache { "사용" } else { "사용 안 함" });
            }
        }
    }

    Ok(())
}

/// CLI 인자와 설정으로 조회기를 만든다 (CLI > 환경 변수 > 설정 파일)
fn open_resolver(
    dataset: &Option<PathBuf>,
    drinks: &Option<PathBuf>,
    mode: &Option<PairingMode>,
    no_cache: bool,
    config: &Config,
) -> Result<(PairingResolver, PairingMode)> {
    let mode = mode.unwrap_or(config.mode);
    let dataset = match dataset {
        Some(path) => path.clone(),
        None => config.dataset_path()?,
    };
    let drinks = match (mode, drinks) {
        (_, Some(path)) => Some(path.clone()),
        (PairingMode::Vector, None) => Some(config.drink_dataset_path()?),
        (PairingMode::Table, None) => None,
    };

    let folder = dataset_folder(&dataset);
    let mut cache = open_cache(&folder, no_cache, config);

    let options = LoadOptions {
        mode,
        dataset,
        drinks,
    };
    let resolver = loader::load_resolver(&options, &mut cache)?;
    persist_cache(&cache, &folder, no_cache, config);

    Ok((resolver, mode))
}

fn resolve_query(resolver: &PairingResolver, food: Option<&str>, random: bool) -> Result<PairingResult> {
    match (food, random) {
        (Some(food), _) => Ok(resolver.query(food)?),
        (None, true) => Ok(resolver.query_random(&mut rand::thread_rng())?),
        (None, false) => Err(PairingAppError::MissingFood),
    }
}

fn dataset_folder(dataset: &Path) -> PathBuf {
    match dataset.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn open_cache(folder: &Path, no_cache: bool, config: &Config) -> TableCache {
    if config.use_cache && !no_cache {
        TableCache::load(folder)
    } else {
        TableCache::new()
    }
}

fn persist_cache(cache: &TableCache, folder: &Path, no_cache: bool, config: &Config) {
    if !config.use_cache || no_cache || !cache.is_dirty() {
        return;
    }
    if let Err(e) = cache.save(folder) {
        tracing::warn!(error = %e, "캐시 저장 실패");
    }
}
