use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	print!("{}", render_summary(config));
}

fn render_summary(config: &ResolvedConfig) -> String {
	let pipeline = &config.pipeline;
	let backend = &config.backend;
	let mut lines = vec![
		"Effective configuration:".to_string(),
		format!("  Debounce: {} ms", pipeline.debounce.as_millis()),
		format!("  Page size: {}", pipeline.params.page_size),
		format!(
			"  Collections: {}",
			pipeline
				.collections
				.iter()
				.map(|spec| spec.name.as_str())
				.collect::<Vec<_>>()
				.join(", ")
		),
		format!(
			"  Highlight tags: {} {}",
			pipeline.params.highlight_start_tag, pipeline.params.highlight_end_tag
		),
		format!("  Excerpt length: {}", pipeline.excerpt_length),
		format!("  Backend: {}", backend.kind.as_str()),
	];
	if let Some(url) = &backend.url {
		lines.push(format!("  Backend URL: {url}"));
	}
	lines.push(format!(
		"  API key: {}",
		if backend.api_key.is_some() { "(set)" } else { "(none)" }
	));
	match &backend.data {
		Some(path) => lines.push(format!("  Corpus: {}", path.display())),
		None => lines.push("  Corpus: (none)".to_string()),
	}
	lines.push(format!("  Backend timeout: {} ms", backend.timeout.as_millis()));

	let mut rendered = lines.join("\n");
	rendered.push('\n');
	rendered
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;
	use std::time::Duration;

	use frond::search::PipelineConfig;

	use super::super::{BackendKind, BackendSettings};
	use super::*;

	#[test]
	fn summary_lists_effective_values_without_secrets() {
		let config = ResolvedConfig {
			pipeline: PipelineConfig::default(),
			backend: BackendSettings {
				kind: BackendKind::Typesense,
				url: Some("http://search:8108".into()),
				api_key: Some("secret".into()),
				data: None,
				timeout: Duration::from_secs(5),
			},
		};

		let summary = render_summary(&config);
		assert!(summary.contains("Debounce: 300 ms"));
		assert!(summary.contains("Collections: listings, users, protocols, threads"));
		assert!(summary.contains("Backend: typesense"));
		assert!(summary.contains("API key: (set)"));
		assert!(!summary.contains("secret"));
		assert!(summary.contains("Corpus: (none)"));
	}

	#[test]
	fn memory_summary_names_the_corpus() {
		let config = ResolvedConfig {
			pipeline: PipelineConfig::default(),
			backend: BackendSettings {
				kind: BackendKind::Memory,
				url: None,
				api_key: None,
				data: Some(PathBuf::from("/srv/corpus.json")),
				timeout: Duration::from_secs(5),
			},
		};
		assert!(render_summary(&config).contains("Corpus: /srv/corpus.json"));
	}
}
