//! miette rendering for compiler diagnostics and library errors.
//!
//! Every [`AstError`] becomes its own report with a snippet of the source.
//! Other [`SequinError`] variants carry no location and render as a plain
//! message with an error code.

use std::fmt;

use miette::{Diagnostic, GraphicalReportHandler, LabeledSpan, Severity, SourceSpan};

use sequin::SequinError;
use sequin_parser::AstError;

/// A boxed diagnostic borrowing from the error and source it describes.
pub type Report<'a> = Box<dyn Diagnostic + 'a>;

/// A compiler diagnostic paired with the source it points into.
#[derive(Debug)]
pub struct DiagnosticAdapter<'a> {
    diag: &'a AstError,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a AstError, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl Diagnostic for DiagnosticAdapter<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        Some(Box::new(self.diag.code()))
    }

    fn severity(&self) -> Option<Severity> {
        Some(if self.diag.severity().is_error() {
            Severity::Error
        } else {
            Severity::Warning
        })
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.diag
            .help()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'b>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = SourceSpan::new(label.span().start().into(), label.span().len());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// A [`SequinError`] without source information.
#[derive(Debug)]
pub struct ErrorAdapter<'a>(pub &'a SequinError);

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl Diagnostic for ErrorAdapter<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        let code = match self.0 {
            SequinError::Io(_) => "sequin::io",
            SequinError::Parse { .. } => "sequin::parse",
            SequinError::Layout(_) => "sequin::layout",
            SequinError::Draw(_) => "sequin::draw",
            SequinError::Style(_) => "sequin::style",
            SequinError::Export(_) => "sequin::export",
        };
        Some(Box::new(code))
    }
}

/// One report per diagnostic, each rendered against `src`.
pub fn diagnostic_reports<'a>(errors: &'a [AstError], src: &'a str) -> Vec<Report<'a>> {
    errors
        .iter()
        .map(|diag| Box::new(DiagnosticAdapter::new(diag, src)) as Report<'a>)
        .collect()
}

/// Reports for a failed run: one per diagnostic for parse errors, a single
/// one otherwise.
pub fn error_reports(err: &SequinError) -> Vec<Report<'_>> {
    match err {
        SequinError::Parse { err, src } => diagnostic_reports(err.errors(), src),
        _ => vec![Box::new(ErrorAdapter(err)) as Report<'_>],
    }
}

/// Render reports with miette's graphical handler, falling back to the bare
/// message if rendering fails.
pub fn render_reports(reports: &[Report<'_>]) -> Vec<String> {
    let handler = GraphicalReportHandler::new();
    reports
        .iter()
        .map(|report| {
            let mut out = String::new();
            match handler.render_report(&mut out, report.as_ref()) {
                Ok(()) => out,
                Err(_) => report.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use sequin::{DiagramBuilder, compile};

    use super::*;

    #[test]
    fn test_parse_error_becomes_one_report_per_diagnostic() {
        let source = "Alice ->\n???\nBob -> Carol";
        let err = DiagramBuilder::default()
            .parse(source)
            .expect_err("source should not compile");
        let SequinError::Parse { err: parse_err, .. } = &err else {
            panic!("expected a parse error, got {err:?}");
        };

        let reports = error_reports(&err);
        assert_eq!(reports.len(), 2);
        for (report, diag) in reports.iter().zip(parse_err.errors()) {
            assert_eq!(report.to_string(), diag.message());
            assert!(report.source_code().is_some());
        }
    }

    #[test]
    fn test_diagnostic_adapter_details() {
        let source = "Alice -> : Hello";
        let (_, errors) = compile(source);
        assert_eq!(errors.len(), 1);

        let adapter = DiagnosticAdapter::new(&errors[0], source);
        assert_eq!(adapter.code().unwrap().to_string(), "E100");
        assert_eq!(adapter.severity(), Some(Severity::Error));

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(labels[0].offset(), 9);
        assert_eq!(labels[0].len(), 1);
    }

    #[test]
    fn test_non_parse_error() {
        let err = SequinError::Layout("no room".to_string());

        let reports = error_reports(&err);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].to_string(), "Layout error: no room");
        assert_eq!(reports[0].code().unwrap().to_string(), "sequin::layout");
        assert!(reports[0].source_code().is_none());
    }

    #[test]
    fn test_render_reports_include_source_snippet() {
        let source = "Alice -> Bob\nAlice -> : Hello";
        let (_, errors) = compile(source);

        let rendered = render_reports(&diagnostic_reports(&errors, source));
        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].contains("E100"));
        assert!(rendered[0].contains("Hello"));
    }
}
