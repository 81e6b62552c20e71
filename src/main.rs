use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use toy_rsa::bench::{render_comparison, render_outcome, BenchConfig, Benchmark, KeySize};
use toy_rsa::rsa::primes::random_prime_pair;
use toy_rsa::rsa::{demonstration_example, generate_keypair_with, KeyGenConfig};
use toy_rsa::session::Session;

#[derive(Parser, Debug)]
#[command(name = "toy-rsa", about = "Educational RSA with toy-sized primes")]
struct Cli {
    /// Largest prime accepted for p or q
    #[arg(long, global = true, default_value_t = toy_rsa::rsa::DEFAULT_MAX_PRIME)]
    max_prime: u64,

    /// First candidate of the public exponent scan
    #[arg(long, global = true, default_value_t = toy_rsa::rsa::keygen::MIN_PUBLIC_EXPONENT)]
    exponent_start: u64,

    /// Log key generation steps and benchmark summaries
    #[arg(short, long, global = true, action = clap::ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate and print a key pair
    Keygen {
        #[arg(short)]
        p: Option<String>,
        #[arg(short)]
        q: Option<String>,
        /// Pick random primes below this bound instead of -p/-q
        #[arg(long, conflicts_with_all = ["p", "q"])]
        random: Option<u64>,
    },
    /// Encrypt a message, printing the ciphertext as a JSON array
    Encrypt {
        #[arg(short)]
        p: String,
        #[arg(short)]
        q: String,
        message: String,
    },
    /// Decrypt a JSON array ciphertext
    Decrypt {
        #[arg(short)]
        p: String,
        #[arg(short)]
        q: String,
        ciphertext: String,
    },
    /// Time key generation, encryption and decryption for one key
    Bench {
        #[arg(short)]
        p: u64,
        #[arg(short)]
        q: u64,
        #[arg(short, long, default_value = "Hello")]
        message: String,
        #[arg(short = 'n', long, default_value_t = toy_rsa::bench::DEFAULT_ITERATIONS)]
        iterations: u32,
    },
    /// Compare several key sizes, e.g. `compare 5x7 61x53 1009x1013`
    Compare {
        #[arg(required = true, value_parser = parse_key_size)]
        sizes: Vec<KeySize>,
        #[arg(short = 'n', long, default_value_t = toy_rsa::bench::DEFAULT_ITERATIONS)]
        iterations: u32,
    },
    /// Walk through the p = 61, q = 53 example
    Demo,
}

fn parse_key_size(raw: &str) -> Result<KeySize, String> {
    let (p, q) = raw
        .split_once(['x', 'X', ','])
        .ok_or_else(|| format!("expected PxQ, got {:?}", raw))?;
    let p = p.trim().parse().map_err(|e| format!("bad p in {:?}: {}", raw, e))?;
    let q = q.trim().parse().map_err(|e| format!("bad q in {:?}: {}", raw, e))?;
    Ok(KeySize::new(p, q))
}

fn session_for(config: &KeyGenConfig, p: &str, q: &str) -> Result<Session> {
    let mut session = Session::new(config.clone());
    session
        .generate_keys(p, q)
        .with_context(|| format!("cannot build key pair from p={}, q={}", p, q))?;
    Ok(session)
}

fn run(cli: Cli) -> Result<()> {
    let config = KeyGenConfig::default()
        .with_max_prime(cli.max_prime)
        .with_exponent_start(cli.exponent_start);

    match cli.command {
        Command::Keygen { p, q, random } => {
            let (p, q) = match (p, q, random) {
                (_, _, Some(bound)) => {
                    let (p, q) = random_prime_pair(&mut rand::thread_rng(), bound.min(config.max_prime.saturating_add(1)))
                        .context("cannot pick random primes")?;
                    (p.to_string(), q.to_string())
                }
                (Some(p), Some(q), None) => (p, q),
                _ => bail!("either -p and -q or --random is required"),
            };

            let session = session_for(&config, &p, &q)?;
            let keys = session.keypair().context("session lost its key pair")?;
            println!("p = {}, q = {}", keys.debug.p, keys.debug.q);
            println!("n = {}", keys.public_key.n);
            println!("lambda = {}", keys.debug.lambda);
            println!("public key  (e, n) = ({}, {})", keys.public_key.e, keys.public_key.n);
            println!("private key (d, n) = ({}, {})", keys.private_key.d, keys.private_key.n);
        }
        Command::Encrypt { p, q, message } => {
            let session = session_for(&config, &p, &q)?;
            let encrypted = session.encrypt(&message).context("encryption failed")?;
            println!("{}", encrypted);
        }
        Command::Decrypt { p, q, ciphertext } => {
            let session = session_for(&config, &p, &q)?;
            let plaintext = session.decrypt_json(&ciphertext).context("decryption failed")?;
            println!("{}", plaintext);
        }
        Command::Bench {
            p,
            q,
            message,
            iterations,
        } => {
            let bench = Benchmark::new(BenchConfig::default().with_keygen(config.clone()));
            println!("{}", render_outcome("key generation", &bench.measure_key_generation(p, q, iterations)));

            // Encryption and decryption need a key; report the keygen error above and stop
            let Ok(keys) = generate_keypair_with(p, q, &config) else {
                return Ok(());
            };
            println!(
                "{}",
                render_outcome("encryption", &bench.measure_encryption(&message, &keys.public_key, iterations))
            );

            if let Ok(encrypted) = keys.public_key.encrypt(&message) {
                println!(
                    "{}",
                    render_outcome("decryption", &bench.measure_decryption(&encrypted, &keys.private_key, iterations))
                );
            }
        }
        Command::Compare { sizes, iterations } => {
            let bench = Benchmark::new(
                BenchConfig::default()
                    .with_iterations(iterations)
                    .with_keygen(config),
            );
            println!("{}", render_comparison(&bench.compare_key_performance(&sizes)));
        }
        Command::Demo => {
            let demo = demonstration_example().context("demonstration failed")?;
            println!("p = {}, q = {}", demo.p, demo.q);
            println!("n = p * q = {}", demo.n);
            println!("lambda = lcm(p - 1, q - 1) = {}", demo.lambda);
            println!("e = {} (smallest e >= 3 coprime to lambda)", demo.e);
            println!("d = e^-1 mod lambda = {}", demo.d);
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
