use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cinema_showtimes::normalize::group_by_theater;
use cinema_showtimes::{Config, Movie, MovieCache, MovieRepository};

#[derive(Parser, Debug)]
#[command(name = "cinema-showtimes", about = "Showtimes from Greek cinema websites")]
struct Cli {
    /// TOML config file; built-in site URLs are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print records as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Movies on one listing page
    List { url: String },
    /// Everything currently showing at the configured cinemas
    NowPlaying,
    /// Everything announced as coming soon at the configured cinemas
    ComingSoon,
    /// Full details of one film page
    Detail { url: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let repository = MovieRepository::new(&config)?;

    match cli.command {
        Commands::List { url } => {
            let movies = repository.fetch_movies(&url).await;
            print_movies(movies.iter(), cli.json)?;
        }
        Commands::NowPlaying => print_tab(&repository, &config, true, cli.json).await?,
        Commands::ComingSoon => print_tab(&repository, &config, false, cli.json).await?,
        Commands::Detail { url } => match repository.fetch_detailed_movie_info(&url).await {
            Some(movie) if cli.json => println!("{}", serde_json::to_string_pretty(&movie)?),
            Some(movie) => print_detail(&movie),
            None => println!("No details available for {url}"),
        },
    }

    Ok(())
}

/// Load every configured listing into a cache and print one tab of it.
async fn print_tab(
    repository: &MovieRepository,
    config: &Config,
    playing: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut cache = MovieCache::new();
    cache.replace_listing(repository.fetch_all(config.listing_urls()).await);
    let selected = if playing {
        cache.now_playing()
    } else {
        cache.coming_soon()
    };
    print_movies(selected.into_iter(), json)
}

fn print_movies<'a>(movies: impl Iterator<Item = &'a Movie>, json: bool) -> anyhow::Result<()> {
    let movies: Vec<&Movie> = movies.collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&movies)?);
        return Ok(());
    }
    for movie in movies {
        let basic = &movie.basic_info;
        println!("TITLE       : {}", basic.title);
        println!("URL         : {}", basic.detail_url);
        println!("POSTER      : {}", basic.poster_url);
        println!(
            "STATUS      : {}",
            if basic.is_playing { "now playing" } else { "coming soon" }
        );
        if !basic.premiere_date.is_empty() {
            println!("PREMIERE    : {}", basic.premiere_date);
        }
        for (theater, showtimes) in group_by_theater(&basic.showtimes) {
            println!("SHOWTIMES   : [{theater}]");
            for st in showtimes {
                println!("              {} {}", st.day(), st.times());
            }
        }
        println!();
    }
    Ok(())
}

fn print_detail(movie: &Movie) {
    let Some(info) = movie.full_info() else {
        return;
    };
    println!("TITLE       : {}", info.title);
    println!("URL         : {}", movie.basic_info.detail_url);
    println!("POSTER      : {}", info.poster_url);
    println!("DIRECTOR    : {}", info.director);
    println!("CAST        : {}", info.cast.join(", "));
    println!("GENRE       : {}", info.genre);
    println!("DURATION    : {}", info.duration);
    println!("RATING      : {}", info.age_rating);
    println!("ROOM        : {}", info.projection_room);
    if !info.premiere_date.is_empty() {
        println!("PREMIERE    : {}", info.premiere_date);
    }
    println!("TRAILER     : {}", info.trailer_url);
    println!("SYNOPSIS    : {}", info.description);
    for (theater, showtimes) in group_by_theater(&info.showtime) {
        println!("SHOWTIMES   : [{theater}]");
        for st in showtimes {
            println!("              {} {}", st.day(), st.times());
        }
    }
}
