mod cli;
mod settings;

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use cli::{CliArgs, OutputFormat, parse_cli, print_json, print_plain};
use frond::backend::{MemoryBackend, TypesenseBackend};
use frond::search::{Category, SearchPipeline, SearchView};
use frond_search_api::SearchBackend;
use settings::{BackendKind, BackendSettings, ResolvedConfig};
use tracing::info;

fn main() -> Result<()> {
	let cli = parse_cli();
	frond::logging::initialize(cli.verbose);

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let runtime = tokio::runtime::Builder::new_current_thread()
		.enable_all()
		.build()
		.context("failed to start async runtime")?;
	let params = resolved.pipeline.params.clone();
	let view = runtime.block_on(run_search(&cli, resolved))?;

	match cli.output {
		OutputFormat::Plain => print_plain(&view, &params),
		OutputFormat::Json => print_json(&view)?,
	}

	Ok(())
}

/// Drive the pipeline the way the search box does and return the settled view.
async fn run_search(cli: &CliArgs, settings: ResolvedConfig) -> Result<SearchView> {
	let backend = build_backend(&settings.backend)?;
	let pipeline = SearchPipeline::new(backend, settings.pipeline);

	if let Some(category) = &cli.category {
		let category: Category = category.parse()?;
		pipeline.set_category(category);
	}

	let query = cli.query.clone().unwrap_or_default();
	info!(query = %query, "starting search");
	pipeline.set_text(query);
	let mut view = pipeline.settled().await;

	for _ in 0..cli.pages {
		if !pipeline.load_more() {
			break;
		}
		view = pipeline.settled().await;
		info!(page = view.page, items = view.items.len(), "loaded another page");
	}

	Ok(view)
}

fn build_backend(settings: &BackendSettings) -> Result<Arc<dyn SearchBackend>> {
	match settings.kind {
		BackendKind::Memory => {
			let path = settings
				.data
				.as_deref()
				.ok_or_else(|| anyhow!("the memory backend needs a corpus file (--data)"))?;
			info!(path = %path.display(), "using memory backend");
			Ok(Arc::new(MemoryBackend::from_path(path)?))
		}
		BackendKind::Typesense => {
			let url = settings
				.url
				.as_deref()
				.ok_or_else(|| anyhow!("the typesense backend needs a URL (--url)"))?;
			info!(url, "using typesense backend");
			Ok(Arc::new(TypesenseBackend::new(
				url,
				settings.api_key.as_deref(),
				settings.timeout,
			)?))
		}
	}
}
