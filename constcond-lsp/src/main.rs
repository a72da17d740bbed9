//! constcond LSP server - live constant conditional test diagnostics.
//!
//! Provides IDE integration with:
//! - Diagnostics on file open/save
//! - Warning markers on conditions that always evaluate the same way
//!
//! Never panics on malformed input: files that fail to parse simply publish
//! no diagnostics.

use std::fs;
use std::path::Path;

use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

use constcond_core::{check_file, default_rules, Finding, Rule};

/// constcond Language Server.
struct ConstcondLsp {
    client: Client,
    rules: Vec<Box<dyn Rule>>,
}

impl ConstcondLsp {
    fn new(client: Client) -> Self {
        Self {
            client,
            rules: default_rules(),
        }
    }

    /// Check one file and publish its diagnostics.
    ///
    /// `content` is the editor's buffer when available (didOpen); otherwise
    /// the file is re-read from disk (didSave without included text).
    async fn run_analysis(&self, uri: Url, content: Option<String>) {
        let file_path = match uri.to_file_path() {
            Ok(p) => p,
            Err(_) => {
                self.log_error("Invalid file URI").await;
                return;
            }
        };

        let content = match content {
            Some(text) => text,
            None => match fs::read_to_string(&file_path) {
                Ok(text) => text,
                Err(e) => {
                    self.log_error(&format!("Failed to read {}: {}", file_path.display(), e))
                        .await;
                    return;
                }
            },
        };

        let diagnostics = compute_diagnostics(&file_path, &content, &self.rules);

        self.log_info(&format!(
            "Checked {}: {} finding(s)",
            file_path.display(),
            diagnostics.len()
        ))
        .await;

        self.client
            .publish_diagnostics(uri, diagnostics, None)
            .await;
    }

    async fn log_info(&self, message: &str) {
        self.client.log_message(MessageType::INFO, message).await;
    }

    async fn log_error(&self, message: &str) {
        self.client.log_message(MessageType::ERROR, message).await;
    }
}

/// Converts a finding's 1-indexed line/column anchor into an LSP range
/// spanning the condition text (first line only for multi-line conditions).
fn finding_range(finding: &Finding) -> Range {
    let line = finding.line.saturating_sub(1) as u32;
    let character = finding.column.saturating_sub(1) as u32;
    let len = finding
        .condition
        .lines()
        .next()
        .map(|l| l.chars().count())
        .unwrap_or(1) as u32;

    Range {
        start: Position { line, character },
        end: Position {
            line,
            character: character + len,
        },
    }
}

/// Runs the checker over one file's content and builds LSP diagnostics.
fn compute_diagnostics(path: &Path, content: &str, rules: &[Box<dyn Rule>]) -> Vec<Diagnostic> {
    let result = check_file(path, content, rules);

    result
        .findings
        .iter()
        .map(|finding| Diagnostic {
            range: finding_range(finding),
            severity: Some(DiagnosticSeverity::WARNING),
            code: Some(NumberOrString::String(finding.rule.clone())),
            code_description: None,
            source: Some("constcond".to_string()),
            message: format!("{}: `{}`", finding.message, finding.condition),
            related_information: None,
            tags: None,
            data: None,
        })
        .collect()
}

#[tower_lsp::async_trait]
impl LanguageServer for ConstcondLsp {
    async fn initialize(&self, _params: InitializeParams) -> LspResult<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(false),
                        })),
                        ..Default::default()
                    },
                )),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: "constcond-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "constcond LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> LspResult<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        if uri.path().ends_with(".rs") {
            self.run_analysis(uri, Some(params.text_document.text)).await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;
        if uri.path().ends_with(".rs") {
            self.run_analysis(uri, params.text).await;
        }
    }

    async fn did_change(&self, _params: DidChangeTextDocumentParams) {
        // Checking every keystroke would be noisy; analysis runs on save.
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        // Clear diagnostics for closed file
        self.client
            .publish_diagnostics(params.text_document.uri, vec![], None)
            .await;
    }
}

#[tokio::main]
async fn main() {
    // Set up panic hook for graceful error handling
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] constcond-lsp internal error: {}", info);
    }));

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(ConstcondLsp::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
