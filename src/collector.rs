//! Process snapshot capture.
//!
//! Parses `/proc/[pid]/stat` and `/proc/[pid]/cmdline` on Linux to build a
//! point-in-time snapshot of the live process table. Parsing is split out
//! into pure helpers that take pre-captured text, so malformed-input behavior
//! is testable without a live `/proc`.

use crate::error::{PtopError, Result};

/// One process as observed at snapshot time. Immutable once built; snapshots
/// are rebuilt wholesale every frame rather than patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    /// Process ID.
    pub pid: u32,
    /// Single-character state code as reported by the OS ('?' if unreadable).
    pub state: char,
    /// Resident memory in kibibytes (0 if unreadable).
    pub rss_kib: u64,
    /// Short command name from the stat comm field (empty if unreadable).
    pub name: String,
    /// Full command line, NUL separators rendered as spaces (empty for
    /// kernel threads and unreadable processes).
    pub cmdline: String,
}

/// Fields extracted from one raw `/proc/[pid]/stat` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatFields {
    /// Command name with the enclosing parentheses stripped.
    pub name: String,
    /// State character.
    pub state: char,
    /// Resident set size in pages.
    pub rss_pages: u64,
}

impl Default for StatFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            state: '?',
            rss_pages: 0,
        }
    }
}

/// Parses a raw `/proc/[pid]/stat` line, best-effort.
///
/// The comm field is the only one that may contain spaces or parentheses, so
/// the last `)` ends it regardless of its content. The parentheses are
/// stripped only when both are present in order; a malformed comm (no
/// parenthesis pair) keeps its raw token as the name. Unparseable numeric
/// fields default to zero.
pub fn parse_stat(raw: &str) -> StatFields {
    if let (Some(start), Some(end)) = (raw.find('('), raw.rfind(')')) {
        if start < end {
            let name = raw[start + 1..end].to_string();
            let cols: Vec<&str> = raw[end + 1..].split_whitespace().collect();
            let state = cols.first().and_then(|s| s.chars().next()).unwrap_or('?');
            // state is field 3 of the record; rss is field 24
            let rss_pages = cols.get(21).and_then(|s| s.parse().ok()).unwrap_or(0);
            return StatFields {
                name,
                state,
                rss_pages,
            };
        }
    }

    // No parenthesis pair to strip: fall back to plain whitespace columns.
    let cols: Vec<&str> = raw.split_whitespace().collect();
    StatFields {
        name: cols.get(1).unwrap_or(&"").to_string(),
        state: cols.get(2).and_then(|s| s.chars().next()).unwrap_or('?'),
        rss_pages: cols.get(23).and_then(|s| s.parse().ok()).unwrap_or(0),
    }
}

/// Renders a raw `/proc/[pid]/cmdline` blob as a display string.
///
/// Arguments are NUL-separated and the blob usually ends with a trailing NUL;
/// trimming after the replacement keeps the trailing separator from leaving
/// an artifact.
pub fn parse_cmdline(raw: &str) -> String {
    raw.replace('\0', " ").trim().to_string()
}

/// Returns true when the OS process table can be enumerated at all.
/// A false here is fatal to the program; per-process read failures are not.
pub fn is_available() -> bool {
    #[cfg(target_os = "linux")]
    {
        std::path::Path::new("/proc").exists()
    }
    #[cfg(not(target_os = "linux"))]
    {
        false
    }
}

/// Captures a snapshot of all currently visible processes.
///
/// Entries under `/proc` whose name does not parse as a pid are skipped (the
/// table also holds non-process entries). A process that exits or denies
/// access between enumeration and read still yields a record, with its
/// unreadable fields at their defaults. Output order is OS enumeration order
/// and carries no meaning; ordering is the sorter's job.
#[cfg(target_os = "linux")]
pub fn capture() -> Result<Vec<ProcessRecord>> {
    let entries = std::fs::read_dir("/proc").map_err(|e| PtopError::Enumeration {
        message: e.to_string(),
    })?;

    let page_kib = page_size_kib();
    let mut snapshot = Vec::new();

    for entry in entries.flatten() {
        if let Ok(pid) = entry.file_name().to_string_lossy().parse::<u32>() {
            snapshot.push(read_process(pid, page_kib));
        }
    }

    Ok(snapshot)
}

#[cfg(not(target_os = "linux"))]
pub fn capture() -> Result<Vec<ProcessRecord>> {
    Err(PtopError::ProcessTableUnavailable)
}

/// Reads one process, degrading unreadable fields to their defaults.
#[cfg(target_os = "linux")]
fn read_process(pid: u32, page_kib: u64) -> ProcessRecord {
    let stat = std::fs::read_to_string(format!("/proc/{pid}/stat"))
        .map(|raw| parse_stat(&raw))
        .unwrap_or_default();

    let cmdline = std::fs::read_to_string(format!("/proc/{pid}/cmdline"))
        .map(|raw| parse_cmdline(&raw))
        .unwrap_or_default();

    ProcessRecord {
        pid,
        state: stat.state,
        rss_kib: stat.rss_pages * page_kib,
        name: stat.name,
        cmdline,
    }
}

#[cfg(target_os = "linux")]
#[allow(unsafe_code)]
fn page_size_kib() -> u64 {
    // SAFETY: sysconf takes no pointers and has no preconditions.
    let bytes = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if bytes > 0 {
        bytes as u64 / 1024
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 24 fields of a realistic stat record: pid (comm) state ppid ... rss ...
    fn stat_line(comm: &str, state: char, rss: u64) -> String {
        format!(
            "1234 {comm} {state} 1 1234 1234 0 -1 4194304 1000 0 0 0 \
             50 20 0 0 20 0 1 0 100000 10000000 {rss} 18446744073709551615"
        )
    }

    #[test]
    fn test_parse_stat_basic() {
        let fields = parse_stat(&stat_line("(bash)", 'S', 642));
        assert_eq!(fields.name, "bash");
        assert_eq!(fields.state, 'S');
        assert_eq!(fields.rss_pages, 642);
    }

    #[test]
    fn test_parse_stat_comm_with_spaces_and_parens() {
        // kernel worker comms like "((sd-pam))" or "(Web Content)" must
        // survive intact; the last ')' ends the field
        let fields = parse_stat(&stat_line("((sd-pam))", 'S', 10));
        assert_eq!(fields.name, "(sd-pam)");

        let fields = parse_stat(&stat_line("(Web Content)", 'R', 99));
        assert_eq!(fields.name, "Web Content");
        assert_eq!(fields.state, 'R');
        assert_eq!(fields.rss_pages, 99);
    }

    #[test]
    fn test_parse_stat_malformed_comm_falls_back_to_raw() {
        let fields = parse_stat("1234 bash S 1 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 1 0 0 0 77");
        assert_eq!(fields.name, "bash");
        assert_eq!(fields.state, 'S');
        assert_eq!(fields.rss_pages, 77);
    }

    #[test]
    fn test_parse_stat_single_paren_does_not_panic() {
        let fields = parse_stat("1234 (bash S 1");
        assert_eq!(fields.name, "(bash");
        assert_eq!(fields.state, 'S');

        let fields = parse_stat("1234 bash) S 1");
        assert_eq!(fields.name, "bash)");
    }

    #[test]
    fn test_parse_stat_degenerate_input() {
        assert_eq!(parse_stat(""), StatFields::default());
        assert_eq!(parse_stat("1234"), StatFields::default());

        // reversed parens must not slice out of order
        let fields = parse_stat("1234 )x( S");
        assert_eq!(fields.name, ")x(");
    }

    #[test]
    fn test_parse_stat_empty_comm() {
        let fields = parse_stat(&stat_line("()", 'Z', 0));
        assert_eq!(fields.name, "");
        assert_eq!(fields.state, 'Z');
    }

    #[test]
    fn test_parse_stat_unparseable_rss_defaults_to_zero() {
        let fields = parse_stat("1234 (bash) S 1 2 3");
        assert_eq!(fields.rss_pages, 0);
    }

    #[test]
    fn test_parse_cmdline_joins_nul_separators() {
        assert_eq!(parse_cmdline("ls\0-la\0"), "ls -la");
        assert_eq!(parse_cmdline("/usr/bin/foo\0--bar=1\0baz\0"), "/usr/bin/foo --bar=1 baz");
    }

    #[test]
    fn test_parse_cmdline_empty() {
        assert_eq!(parse_cmdline(""), "");
        assert_eq!(parse_cmdline("\0"), "");
    }

    #[test]
    fn test_stat_fields_default() {
        let fields = StatFields::default();
        assert_eq!(fields.state, '?');
        assert_eq!(fields.rss_pages, 0);
        assert!(fields.name.is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_capture_finds_processes() {
        let snapshot = capture().unwrap();
        assert!(!snapshot.is_empty(), "should find at least one process");
        assert!(snapshot.iter().any(|p| p.pid == 1 || p.pid == std::process::id()));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_capture_is_available() {
        assert!(is_available());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_page_size_sane() {
        let kib = page_size_kib();
        assert!(kib >= 4, "page size should be at least 4 KiB, got {kib}");
    }
}
