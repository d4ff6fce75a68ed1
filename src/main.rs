// src/main.rs
use anyhow::bail;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_blog::{
    render_document, AppError, BlogCommand, BlogConfig, CommandLineInput, ContentNormalizer,
    GenerationCache, NotionHttpClient, PageId, PostSummary, ReadingTime,
};
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_blog.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // stdout carries the rendered output
    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

fn print_post_line(post: &PostSummary, reading_time: Option<&ReadingTime>) {
    let date = if post.date.is_empty() {
        "----------"
    } else {
        post.date.as_str()
    };
    let mut line = format!("{}  {:<32}  {} ({})", date, post.slug, post.title, post.author);
    if !post.tags.is_empty() {
        line.push_str(&format!(" [{}]", post.tags.join(", ")));
    }
    if let Some(reading_time) = reading_time {
        line.push_str(&format!(" ~{} min", reading_time.minutes));
    }
    println!("{}", line);
}

async fn list_posts(
    normalizer: &ContentNormalizer<'_>,
    with_reading_time: bool,
) -> anyhow::Result<()> {
    let posts = normalizer.list_published_posts().await;
    if posts.is_empty() {
        println!("No published posts.");
        return Ok(());
    }

    if !with_reading_time {
        posts.iter().for_each(|post| print_post_line(post, None));
        return Ok(());
    }

    let page_ids: Vec<PageId> = posts
        .iter()
        .map(|post| PageId::from_remote(post.id.clone()))
        .collect();
    let bodies = normalizer.get_many_page_blocks(&page_ids).await;
    for (post, blocks) in posts.iter().zip(&bodies) {
        print_post_line(post, Some(&ReadingTime::estimate(blocks)));
    }
    Ok(())
}

/// Attaches the failure's operator hint, when it has one, to `context`.
fn explain(err: AppError, context: String) -> anyhow::Error {
    let context = match err.operator_hint() {
        Some(hint) => format!("{} ({})", context, hint),
        None => context,
    };
    anyhow::Error::new(err).context(context)
}

async fn show_post(normalizer: &ContentNormalizer<'_>, slug: &str) -> anyhow::Result<()> {
    let post = match normalizer.get_post_by_slug(slug).await {
        Ok(Some(post)) => post,
        Ok(None) => bail!("No published post with slug '{}'", slug),
        Err(e) => return Err(explain(e, format!("Could not look up post '{}'", slug))),
    };

    let blocks = normalizer
        .try_get_page_blocks(&PageId::from_remote(post.id.clone()))
        .await
        .map_err(|e| explain(e, format!("Could not fetch content of '{}'", slug)))?;
    let reading_time = ReadingTime::estimate(&blocks);

    println!("# {}", post.title);
    println!(
        "{} · {} · {} min read",
        if post.date.is_empty() { "undated" } else { post.date.as_str() },
        post.author,
        reading_time.minutes
    );
    if !post.tags.is_empty() {
        println!("Tags: {}", post.tags.join(", "));
    }
    if !post.summary.is_empty() {
        println!("\n{}", post.summary);
    }
    println!();
    println!("{}", render_document(&blocks).to_html());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = BlogConfig::resolve(&cli)?;
    let client = NotionHttpClient::new(&config.api_key, config.request_timeout)?;

    // one generation pass per invocation
    let cache = GenerationCache::new();
    let normalizer = ContentNormalizer::new(&client, config.database_id.clone())
        .with_cache(&cache)
        .with_concurrency(config.concurrency);

    match &cli.command {
        BlogCommand::List { reading_time } => list_posts(&normalizer, *reading_time).await?,
        BlogCommand::Show { slug } => show_post(&normalizer, slug).await?,
    }

    let (hits, misses) = cache.stats();
    log::debug!("Cache: {} hits, {} misses", hits, misses);
    Ok(())
}
