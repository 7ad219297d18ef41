// MINUET: Offline Analysis of Vehicular Clustering and Relay-Election Simulation Logs
// Copyright (C) 2024-2025 The MINUET authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use regex::Regex;

pub trait LogParser<R, T: Clone>: Sized {
    /// Create a new log parser.
    fn new() -> Self;

    /// Return the list of all regexes.
    fn re() -> Vec<(T, Regex)>;

    /// Return a description of the logger
    fn description() -> &'static str;

    /// The generic parser that matches the regexes of [`LogParser::re`].
    fn generic(&self) -> &GenericLogParser<T>;

    /// Turn a matched line into a record. Returns `None` if any required field cannot be parsed.
    fn record(&self, log: GenericLog<T>) -> Option<R>;

    /// Lazily parse all records of a log. Lines that do not match are skipped.
    fn parse<'a, B>(&'a self, reader: B) -> impl Iterator<Item = R> + 'a
    where
        B: BufRead + 'a,
        R: 'a,
        T: 'a,
    {
        self.generic()
            .parse(reader)
            .filter_map(move |log| self.record(log))
    }

    /// Lazily parse all records of the log file at `path`. A missing file yields no records.
    fn parse_file<'a>(&'a self, path: &Path) -> impl Iterator<Item = R> + 'a
    where
        R: 'a,
        T: 'a,
    {
        let reader = open_log(path, Self::description());
        reader.into_iter().flat_map(move |r| self.parse(r))
    }
}

/// Open a log file for reading. Missing or unreadable files are reported and result in `None`.
pub fn open_log(path: &Path, description: &str) -> Option<BufReader<File>> {
    match File::open(path) {
        Ok(f) => {
            log::debug!("Reading {description} log {path:?}");
            Some(BufReader::new(f))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("{description} log not found: {path:?}");
            None
        }
        Err(e) => {
            log::warn!("Cannot read {description} log {path:?}: {e}");
            None
        }
    }
}

/// The generic log parser strips the timestamp of each line and matches the remainder against
/// a list of regular expressions.
pub struct GenericLogParser<T> {
    re: Vec<(T, Regex)>,
}

pub struct GenericLog<T> {
    pub kind: T,
    /// Timestamp of the line in nanoseconds, if the line starts with one.
    pub time: Option<u64>,
    /// All matched groups. The first one always corresponds to the entire match (without the
    /// timestamp).
    pub groups: Vec<String>,
}

lazy_static::lazy_static! {
    static ref TIME_SECS_RE: Regex = Regex::new(r"^(\d+(?:\.\d+)?)s - (.*)$").unwrap();
    static ref TIME_NS_RE: Regex = Regex::new(r"^(\d+)ns - (.*)$").unwrap();
}

impl<T: Clone> GenericLogParser<T> {
    /// Create a new generic log parser.
    ///
    /// The `re` contains a list of regular expressions that will be evaluated on every line (in the
    /// given order). If a regular expression matches, then this is returned in the parsed list.
    /// The regular expression *must not* contain the timestamp and the subsequent ` - `; these
    /// are parsed out by the generic log parser automatically. Lines without a timestamp are
    /// matched as a whole.
    pub fn new(re: Vec<(T, Regex)>) -> Self {
        Self { re }
    }

    pub fn new_from<P: LogParser<R, T>, R>() -> Self {
        Self::new(P::re())
    }

    /// Lazily parse every line of `reader`. Invalid UTF-8 is replaced; reading stops at the first
    /// I/O error.
    pub fn parse<'a, B: BufRead + 'a>(
        &'a self,
        reader: B,
    ) -> impl Iterator<Item = GenericLog<T>> + 'a {
        reader
            .split(b'\n')
            .map_while(|line| {
                line.map_err(|e| log::warn!("Stopped reading log: {e}"))
                    .ok()
            })
            .filter_map(move |line| {
                let line = String::from_utf8_lossy(&line);
                self.parse_line(line.trim_end_matches('\r'))
            })
    }

    pub fn parse_line(&self, line: &str) -> Option<GenericLog<T>> {
        // parse the timestamp
        let (time, rest) = if let Some(m) = TIME_NS_RE.captures(line) {
            (Some(parse_num::<u64>(m.get(1)?.as_str())?), m.get(2)?.as_str())
        } else if let Some(m) = TIME_SECS_RE.captures(line) {
            (Some(parse_secs(m.get(1)?.as_str())?), m.get(2)?.as_str())
        } else {
            (None, line)
        };

        // try all the given regexes
        for (t, re) in &self.re {
            if let Some(m) = re.captures(rest) {
                let groups = m
                    .iter()
                    .map(|x| x.map(|x| x.as_str().to_string()).unwrap_or_default())
                    .collect();
                return Some(GenericLog {
                    kind: t.clone(),
                    time,
                    groups,
                });
            }
        }

        log::trace!("Skipping line: {line}");
        None
    }
}

impl<T: Clone + std::fmt::Debug + PartialEq> GenericLogParser<T> {
    #[cfg(test)]
    #[track_caller]
    /// Test whether a given line matches. The timestamp is ignored. The expected groups *must not*
    /// contain the group 0 (which matches the entire line), but immediately start with the first one.
    pub fn test_line<const N: usize>(&self, line: &str, exp: Option<(T, [&str; N])>) {
        match (self.parse_line(line), exp) {
            (Some(got), Some((want_kind, want_groups))) => {
                assert_eq!(got.kind, want_kind, "Invalid line kind");
                assert_eq!(
                    got.groups.len() - 1,
                    want_groups.len(),
                    "Unexpected number of matched groups."
                );
                for (i, (got_g, want_g)) in got
                    .groups
                    .iter()
                    .map(String::as_str)
                    .skip(1)
                    .zip(want_groups)
                    .enumerate()
                {
                    assert_eq!(got_g, want_g, "Capture group {} doesn't match", i + 1)
                }
            }
            (None, None) => {}
            (Some(got), None) => panic!(
                "Line matched with kind {:?} and groups {:?}",
                got.kind,
                &got.groups[1..]
            ),
            (None, Some((want_kind, want_groups))) => {
                panic!("Line did not match. Expected kind {want_kind:?} and groups {want_groups:?}",)
            }
        }
    }
}

/// Parse a decimal number of seconds (`12.5`) into nanoseconds without going through floating
/// point. Digits beyond nanosecond precision are truncated.
pub fn parse_secs(secs: impl AsRef<str>) -> Option<u64> {
    let (int, frac) = match secs.as_ref().split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (secs.as_ref(), ""),
    };
    if !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let frac = format!("{:0<9}", &frac[..frac.len().min(9)]);
    u64::from_str(int)
        .ok()?
        .checked_mul(1_000_000_000)?
        .checked_add(u64::from_str(&frac).ok()?)
}

pub fn parse_num<N: FromStr>(num: impl AsRef<str>) -> Option<N> {
    N::from_str(num.as_ref()).ok()
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Kind {
        Hello,
        World,
    }

    fn parser() -> GenericLogParser<Kind> {
        GenericLogParser::new(vec![
            (Kind::Hello, Regex::new(r"^hello (\d+)$").unwrap()),
            (Kind::World, Regex::new(r"world (\w+)").unwrap()),
        ])
    }

    #[test]
    fn secs_to_ns() {
        assert_eq!(parse_secs("550"), Some(550_000_000_000));
        assert_eq!(parse_secs("12.5"), Some(12_500_000_000));
        assert_eq!(parse_secs("0.000000001"), Some(1));
        assert_eq!(parse_secs("1.1234567899"), Some(1_123_456_789));
        assert_eq!(parse_secs("abc"), None);
    }

    #[test]
    fn strips_timestamps() {
        let p = parser();
        let log = p.parse_line("12.5s - hello 3").unwrap();
        assert_eq!(log.kind, Kind::Hello);
        assert_eq!(log.time, Some(12_500_000_000));
        let log = p.parse_line("1200ns - hello 3").unwrap();
        assert_eq!(log.time, Some(1200));
        let log = p.parse_line("the world turns").unwrap();
        assert_eq!(log.kind, Kind::World);
        assert_eq!(log.time, None);
    }

    #[test]
    fn first_regex_wins() {
        parser().test_line("1s - hello 42", Some((Kind::Hello, ["42"])));
        parser().test_line("hello world wide", Some((Kind::World, ["wide"])));
        parser().test_line::<0>("goodbye", None);
    }

    #[test]
    fn lazy_parse_skips_garbage() {
        let input: &[u8] = b"hello 1\r\n\xff\xfe garbage\nworld x\nnothing\n2s - hello 2";
        let p = parser();
        let kinds: Vec<Kind> = p.parse(input).map(|l| l.kind).collect();
        assert_eq!(kinds, vec![Kind::Hello, Kind::World, Kind::Hello]);
    }

    #[test]
    fn missing_file_is_empty() {
        assert!(open_log(Path::new("/nonexistent/minuet/log.txt"), "test").is_none());
    }
}
