// ==================== BATCH FIELD UPDATER ====================
// Percorre todos os documentos de uma coleção e aplica um patch por documento,
// imprimindo uma linha de confirmação após cada escrita bem-sucedida

use futures::stream::StreamExt;
use std::io::Write;
use std::time::Duration;

use crate::{
    database::DocumentStore,
    models::{FailedUpdate, JobReport, UpdateMode},
    utils::AppError,
};

/// O que fazer quando a escrita de um documento é recusada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Interrompe o lote na primeira escrita recusada
    Abort,
    /// Registra a falha e segue para o próximo documento
    Continue,
}

#[derive(Debug, Clone)]
pub struct JobOptions {
    pub collection: String,
    pub mode: UpdateMode,
    pub unit: String,
    pub policy: FailurePolicy,
    pub pause: Duration,
}

/// Runs one sequential pass over `options.collection`.
///
/// Authentication and connection errors always end the run, whether they
/// come from the listing or from a write. Only rejected writes
/// (`AppError::Update`) follow `options.policy`: under `Abort` the first one is
/// returned as the error; documents already written stay written.
pub async fn run<S, W>(store: &S, options: &JobOptions, out: &mut W) -> Result<JobReport, AppError>
where
    S: DocumentStore + ?Sized,
    W: Write,
{
    log::info!(
        "🚀 Starting batch on '{}': {}",
        options.collection,
        options.mode.describe()
    );

    let mut report = JobReport::start();
    let mut documents = store.list_documents(&options.collection).await?;

    while let Some(next) = documents.next().await {
        let handle = match next {
            Ok(handle) => handle,
            Err(e) => {
                finish(&mut report);
                return Err(e);
            }
        };

        if report.scanned > 0 && !options.pause.is_zero() {
            tokio::time::sleep(options.pause).await;
        }
        report.scanned += 1;

        let Some(patch) = options.mode.patch_for(handle.fields()) else {
            report.skipped += 1;
            log::debug!("  ⏭️  Skipping {}", handle.id());
            continue;
        };

        match store.apply_patch(&options.collection, &handle, &patch).await {
            Ok(()) => {
                report.updated += 1;
                writeln!(
                    out,
                    "{}",
                    options.mode.confirmation(&handle.id(), &patch, &options.unit)
                )?;
            }
            Err(e @ AppError::Update { .. }) => {
                log::error!("  ❌ {}", e);
                report.failed.push(FailedUpdate {
                    id: handle.id(),
                    message: e.to_string(),
                });
                if options.policy == FailurePolicy::Abort {
                    log::error!("🛑 Aborting batch after first failed update");
                    finish(&mut report);
                    return Err(e);
                }
            }
            // Falha de autenticação ou conexão: fatal em qualquer política
            Err(e) => {
                log::error!("🛑 Lost the store while updating {}: {}", handle.id(), e);
                finish(&mut report);
                return Err(e);
            }
        }
    }

    finish(&mut report);
    Ok(report)
}

fn finish(report: &mut JobReport) {
    report.finish();
    log::info!("📊 Batch summary: {}", report.summary());
}
