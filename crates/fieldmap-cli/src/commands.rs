use std::time::Instant;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{error, info, trace, warn};

use fieldmap_cli::input::{
    collect_inputs, load_rules, read_entries, read_inputs, resolve_mappings_dir, write_json,
};
use fieldmap_cli::logging::sample_preview;
use fieldmap_map::{Classifier, MappingSource, MappingStore, RuleEngine, SEED_DOMAIN};
use fieldmap_validate::Validator;

use crate::cli::{ClassifyArgs, RulesArgs, ValidateArgs};
use crate::summary::{apply_table_style, header_cell};
use crate::types::{ClassifyResult, ValidateResult};

pub fn run_classify(args: &ClassifyArgs) -> Result<ClassifyResult> {
    let started = Instant::now();
    let rules = load_rules(args.rules.as_deref())?;

    let mappings_dir = resolve_mappings_dir(args.mappings.as_deref());
    let mut store = MappingStore::new();
    if !args.no_seed {
        store.push_source(SEED_DOMAIN, MappingSource::seed());
    }
    store
        .extend_from_dir(&mappings_dir)
        .with_context(|| format!("load mappings from {}", mappings_dir.display()))?;

    let file_inputs = match &args.input {
        Some(path) => read_inputs(path)?,
        None => Vec::new(),
    };
    let inputs = collect_inputs(&args.names, file_inputs);
    if inputs.is_empty() {
        bail!("no field names given; pass NAMES or --input");
    }
    for input in &inputs {
        trace!(field = %input.name, samples = %sample_preview(&input.samples), "field input");
    }

    let batch = {
        let classifier = Classifier::new(&store, &rules).context("compile rule set")?;
        classifier.classify_batch(&inputs)
    };
    for name in &batch.unresolved {
        warn!(field = %name, "field unresolved");
    }

    let report = args
        .validate
        .then(|| Validator::new(&rules).validate_batch(&batch.entries));

    if let Some(path) = &args.output {
        write_json(path, &batch)?;
    }

    let (learned, learn_error) = if args.learn {
        match store.learn(&mappings_dir, &batch.entries) {
            Ok(path) => (Some(path), None),
            Err(error) => {
                error!(%error, "learn failed");
                (None, Some(error.to_string()))
            }
        }
    } else {
        (None, None)
    };

    info!(
        fields = inputs.len(),
        resolved = batch.resolved_count(),
        unresolved = batch.unresolved.len(),
        duration_ms = started.elapsed().as_millis(),
        "classify finished"
    );

    Ok(ClassifyResult {
        sources: store.source_names().map(str::to_string).collect(),
        store_warnings: store.warnings().to_vec(),
        batch,
        report,
        output: args.output.clone(),
        learned,
        learn_error,
    })
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidateResult> {
    let rules = load_rules(args.rules.as_deref())?;
    let entries = read_entries(&args.entries)?;
    for loaded in &entries {
        if let Some(group) = loaded.unknown_group() {
            warn!(field = %loaded.entry.source_name, group, "unknown group read as general");
        }
    }
    let report = Validator::new(&rules).validate_loaded_batch(&entries);
    if let Some(path) = &args.output {
        write_json(path, &report)?;
    }
    Ok(ValidateResult {
        report,
        output: args.output.clone(),
    })
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let rules = load_rules(args.rules.as_deref())?;
    let engine = RuleEngine::new(&rules.rules).context("compile rule set")?;

    println!("Rule set {} ({} rules)", rules.version, engine.len());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Priority"),
        header_cell("Match"),
        header_cell("Pattern"),
        header_cell("Group"),
        header_cell("Kind"),
        header_cell("Token"),
    ]);
    apply_table_style(&mut table);
    for (rank, rule) in engine.ranked().enumerate() {
        let class = &rule.classification;
        table.add_row(vec![
            (rank + 1).to_string(),
            rule.priority.to_string(),
            rule.trigger.kind_label().to_string(),
            rule.trigger.pattern(),
            class.group.to_string(),
            class.kind.to_string(),
            class.token.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{table}");
    Ok(())
}
