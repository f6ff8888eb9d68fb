//! Telemetry Module for Scam Sentry
//!
//! Collects anonymous statistics about analyzed messages for:
//! - The dashboard (`/v1/stats`)
//! - Performance monitoring
//! - Periodic JSON / CSV exports
//!
//! Privacy-first: message text is never stored, only the score, level,
//! channel and which listed keywords matched.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::samples::Channel;
use crate::models::types::{RiskAssessment, RiskLevel};
use crate::utils::constants::TOP_KEYWORDS_LIMIT;

/// Single telemetry event (anonymized)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryEvent {
    /// Unix timestamp
    pub timestamp: u64,
    pub channel: Channel,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub matched_keywords: Vec<String>,
    /// Analysis latency in milliseconds
    pub latency_ms: u64,
}

impl TelemetryEvent {
    pub fn new(assessment: &RiskAssessment, channel: Channel, latency_ms: u64) -> Self {
        Self {
            timestamp: current_timestamp(),
            channel,
            risk_score: assessment.risk_score,
            risk_level: assessment.risk_level,
            matched_keywords: assessment.matched_keywords.clone(),
            latency_ms,
        }
    }
}

/// Keyword with its hit count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: u64,
}

/// Aggregated statistics for reporting
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelemetryStats {
    /// Total messages analyzed
    pub total_analyzed: u64,
    /// HIGH + CRITICAL
    pub total_threats: u64,
    /// Count per risk level ("LOW", "MEDIUM", ...)
    pub by_level: HashMap<String, u64>,
    /// Count per channel ("SMS", "EMAIL", ...)
    pub by_channel: HashMap<String, u64>,
    pub urgency_patterns: u64,
    pub threat_patterns: u64,
    pub money_patterns: u64,
    /// Most frequently matched scam phrases, descending
    pub top_keywords: Vec<KeywordCount>,
    /// Average analysis latency (ms)
    pub avg_latency_ms: f64,
    /// Period start timestamp
    pub period_start: u64,
    /// Period end timestamp
    pub period_end: u64,
}

impl TelemetryStats {
    /// Plain-text summary for shutdown logs
    pub fn summary(&self) -> String {
        let level = |l: RiskLevel| self.by_level.get(l.as_str()).copied().unwrap_or(0);

        format!(
            "Analyzed: {} | Threats: {} | CRITICAL: {} HIGH: {} MEDIUM: {} LOW: {} | Avg latency: {:.2}ms",
            self.total_analyzed,
            self.total_threats,
            level(RiskLevel::Critical),
            level(RiskLevel::High),
            level(RiskLevel::Medium),
            level(RiskLevel::Low),
            self.avg_latency_ms,
        )
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Export as CSV row
    pub fn to_csv_row(&self) -> String {
        let level = |l: RiskLevel| self.by_level.get(l.as_str()).copied().unwrap_or(0);

        format!(
            "{},{},{},{},{},{},{},{},{:.2}\n",
            self.period_start,
            self.period_end,
            self.total_analyzed,
            self.total_threats,
            level(RiskLevel::Low),
            level(RiskLevel::Medium),
            level(RiskLevel::High),
            level(RiskLevel::Critical),
            self.avg_latency_ms,
        )
    }
}

/// Main telemetry collector
pub struct TelemetryCollector {
    /// Event buffer (in-memory)
    events: Arc<RwLock<Vec<TelemetryEvent>>>,
    /// Atomic counters for fast updates
    total_analyzed: AtomicU64,
    total_threats: AtomicU64,
    total_latency_ms: AtomicU64,
    urgency_patterns: AtomicU64,
    threat_patterns: AtomicU64,
    money_patterns: AtomicU64,
    level_counts: Arc<RwLock<HashMap<RiskLevel, u64>>>,
    channel_counts: Arc<RwLock<HashMap<Channel, u64>>>,
    keyword_counts: Arc<RwLock<HashMap<String, u64>>>,
    /// Session start time
    session_start: u64,
    /// Export directory
    export_dir: PathBuf,
    /// Max events in memory before flush
    max_buffer_size: usize,
}

impl TelemetryCollector {
    /// Create new collector with default settings
    pub fn new() -> Self {
        Self::with_config(PathBuf::from("./telemetry"), 1000)
    }

    /// Create collector with custom config.
    /// The export directory is created lazily on first write.
    pub fn with_config(export_dir: PathBuf, max_buffer_size: usize) -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::with_capacity(max_buffer_size))),
            total_analyzed: AtomicU64::new(0),
            total_threats: AtomicU64::new(0),
            total_latency_ms: AtomicU64::new(0),
            urgency_patterns: AtomicU64::new(0),
            threat_patterns: AtomicU64::new(0),
            money_patterns: AtomicU64::new(0),
            level_counts: Arc::new(RwLock::new(HashMap::new())),
            channel_counts: Arc::new(RwLock::new(HashMap::new())),
            keyword_counts: Arc::new(RwLock::new(HashMap::new())),
            session_start: current_timestamp(),
            export_dir,
            max_buffer_size,
        }
    }

    /// Record one completed analysis
    pub fn record(&self, assessment: &RiskAssessment, channel: Channel, latency_ms: u64) {
        self.total_analyzed.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);

        if assessment.risk_level.is_threat() {
            self.total_threats.fetch_add(1, Ordering::Relaxed);
        }

        let patterns = assessment.patterns;
        if patterns.urgency {
            self.urgency_patterns.fetch_add(1, Ordering::Relaxed);
        }
        if patterns.threats {
            self.threat_patterns.fetch_add(1, Ordering::Relaxed);
        }
        if patterns.money_requests {
            self.money_patterns.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut counts) = self.level_counts.write() {
            *counts.entry(assessment.risk_level).or_insert(0) += 1;
        }

        if let Ok(mut counts) = self.channel_counts.write() {
            *counts.entry(channel).or_insert(0) += 1;
        }

        if let Ok(mut counts) = self.keyword_counts.write() {
            for keyword in &assessment.matched_keywords {
                *counts.entry(keyword.clone()).or_insert(0) += 1;
            }
        }

        // Only threats are buffered for the event log
        if !assessment.risk_level.is_threat() {
            return;
        }

        if let Ok(mut events) = self.events.write() {
            events.push(TelemetryEvent::new(assessment, channel, latency_ms));

            // Auto-flush if buffer full
            if events.len() >= self.max_buffer_size {
                let events_to_flush = std::mem::take(&mut *events);
                drop(events); // Release lock before I/O
                if let Err(e) = self.flush_events(&events_to_flush) {
                    tracing::warn!(error = %e, "Failed to flush telemetry events");
                    self.restore_events(events_to_flush);
                }
            }
        }
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        let total_analyzed = self.total_analyzed.load(Ordering::Relaxed);
        let total_latency = self.total_latency_ms.load(Ordering::Relaxed);

        let avg_latency = if total_analyzed > 0 {
            total_latency as f64 / total_analyzed as f64
        } else {
            0.0
        };

        let by_level = self
            .level_counts
            .read()
            .map(|counts| {
                counts
                    .iter()
                    .map(|(k, v)| (k.as_str().to_string(), *v))
                    .collect()
            })
            .unwrap_or_default();

        let by_channel = self
            .channel_counts
            .read()
            .map(|counts| {
                counts
                    .iter()
                    .map(|(k, v)| (k.as_str().to_string(), *v))
                    .collect()
            })
            .unwrap_or_default();

        TelemetryStats {
            total_analyzed,
            total_threats: self.total_threats.load(Ordering::Relaxed),
            by_level,
            by_channel,
            urgency_patterns: self.urgency_patterns.load(Ordering::Relaxed),
            threat_patterns: self.threat_patterns.load(Ordering::Relaxed),
            money_patterns: self.money_patterns.load(Ordering::Relaxed),
            top_keywords: self.top_keywords(TOP_KEYWORDS_LIMIT),
            avg_latency_ms: avg_latency,
            period_start: self.session_start,
            period_end: current_timestamp(),
        }
    }

    /// Most matched keywords, count descending then alphabetical
    pub fn top_keywords(&self, limit: usize) -> Vec<KeywordCount> {
        let mut keywords: Vec<KeywordCount> = self
            .keyword_counts
            .read()
            .map(|counts| {
                counts
                    .iter()
                    .map(|(k, v)| KeywordCount {
                        keyword: k.clone(),
                        count: *v,
                    })
                    .collect()
            })
            .unwrap_or_default();

        keywords.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.keyword.cmp(&b.keyword)));
        keywords.truncate(limit);
        keywords
    }

    /// Number of threat events waiting to be flushed
    pub fn buffered_events(&self) -> usize {
        self.events.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Export current stats to JSON file
    pub fn export_stats_json(&self) -> Result<PathBuf, std::io::Error> {
        fs::create_dir_all(&self.export_dir)?;

        let stats = self.get_stats();
        let filename = format!("stats_{}.json", current_timestamp());
        let path = self.export_dir.join(filename);

        fs::write(&path, stats.to_json())?;

        Ok(path)
    }

    /// Export stats to CSV (append mode)
    pub fn export_stats_csv(&self) -> Result<PathBuf, std::io::Error> {
        fs::create_dir_all(&self.export_dir)?;

        let stats = self.get_stats();
        let path = self.export_dir.join("telemetry_history.csv");

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        // Write header if new file
        if file.metadata()?.len() == 0 {
            writeln!(
                file,
                "period_start,period_end,total_analyzed,total_threats,low,medium,high,critical,avg_latency_ms"
            )?;
        }

        write!(file, "{}", stats.to_csv_row())?;

        Ok(path)
    }

    /// Flush buffered threat events to disk, returns how many were written
    pub fn flush(&self) -> Result<usize, std::io::Error> {
        let events = match self.events.write() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => return Ok(0),
        };
        if let Err(e) = self.flush_events(&events) {
            self.restore_events(events);
            return Err(e);
        }
        Ok(events.len())
    }

    /// Put events from a failed flush back ahead of anything recorded since.
    /// Keeps at most twice the buffer size so a dead disk cannot grow memory
    /// without bound.
    fn restore_events(&self, mut failed: Vec<TelemetryEvent>) {
        let Ok(mut events) = self.events.write() else {
            return;
        };
        failed.append(&mut events);

        let retained = self.max_buffer_size.saturating_mul(2).max(1);
        if failed.len() > retained {
            let dropped = failed.len() - retained;
            failed.drain(..dropped);
            tracing::warn!(dropped, "Telemetry buffer full, oldest events dropped");
        }
        *events = failed;
    }

    fn flush_events(&self, events: &[TelemetryEvent]) -> Result<(), std::io::Error> {
        if events.is_empty() {
            return Ok(());
        }

        fs::create_dir_all(&self.export_dir)?;

        let filename = format!("events_{}.jsonl", current_timestamp());
        let path = self.export_dir.join(filename);

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        for event in events {
            if let Ok(json) = serde_json::to_string(event) {
                writeln!(file, "{}", json)?;
            }
        }

        Ok(())
    }

    /// Reset counters (for new reporting period)
    pub fn reset(&self) {
        self.total_analyzed.store(0, Ordering::Relaxed);
        self.total_threats.store(0, Ordering::Relaxed);
        self.total_latency_ms.store(0, Ordering::Relaxed);
        self.urgency_patterns.store(0, Ordering::Relaxed);
        self.threat_patterns.store(0, Ordering::Relaxed);
        self.money_patterns.store(0, Ordering::Relaxed);

        if let Ok(mut counts) = self.level_counts.write() {
            counts.clear();
        }
        if let Ok(mut counts) = self.channel_counts.write() {
            counts.clear();
        }
        if let Ok(mut counts) = self.keyword_counts.write() {
            counts.clear();
        }
        if let Ok(mut events) = self.events.write() {
            events.clear();
        }
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

// Helper functions

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::risk_score::score;
    use crate::utils::constants::SAMPLE_DIGITAL_ARREST_SMS;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("scam_sentry_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_collector_basic() {
        let collector = TelemetryCollector::with_config(temp_dir("basic"), 1000);

        collector.record(&score("hello there"), Channel::Sms, 10);
        collector.record(&score("arrest by police"), Channel::Call, 20);
        collector.record(&score("digital arrest, pay fine now"), Channel::Sms, 30);

        let stats = collector.get_stats();
        assert_eq!(stats.total_analyzed, 3);
        assert_eq!(stats.total_threats, 2);
        assert_eq!(stats.by_level.get("LOW"), Some(&1));
        assert_eq!(stats.by_channel.get("SMS"), Some(&2));
        assert_eq!(stats.threat_patterns, 2);
        assert_eq!(stats.avg_latency_ms, 20.0);
        assert_eq!(collector.buffered_events(), 2);

        let level_sum: u64 = stats.by_level.values().sum();
        assert_eq!(level_sum, stats.total_analyzed);
    }

    #[test]
    fn test_top_keywords_ordering() {
        let collector = TelemetryCollector::with_config(temp_dir("top"), 1000);
        collector.record(&score("digital arrest and cybercrime"), Channel::Other, 1);
        collector.record(&score("cybercrime cell"), Channel::Other, 1);

        let top = collector.top_keywords(5);
        assert_eq!(top[0].keyword, "cybercrime");
        assert_eq!(top[0].count, 2);
        assert_eq!(top[1].keyword, "digital arrest");
    }

    #[test]
    fn test_reset() {
        let collector = TelemetryCollector::with_config(temp_dir("reset"), 1000);
        collector.record(&score("arrest"), Channel::Call, 5);
        collector.reset();

        let stats = collector.get_stats();
        assert_eq!(stats.total_analyzed, 0);
        assert!(stats.by_level.is_empty());
        assert!(stats.top_keywords.is_empty());
    }

    #[test]
    fn test_stats_json_export() {
        let stats = TelemetryStats {
            total_analyzed: 1000,
            total_threats: 50,
            avg_latency_ms: 0.5,
            ..Default::default()
        };

        let json = stats.to_json();
        assert!(json.contains("1000"));
        assert!(json.contains("total_threats"));
    }

    #[test]
    fn test_export_and_flush_to_disk() {
        let dir = temp_dir("export");
        let collector = TelemetryCollector::with_config(dir.clone(), 1000);
        collector.record(&score("arrest by police"), Channel::Call, 3);

        let json_path = collector.export_stats_json().unwrap();
        assert!(json_path.exists());

        let csv_path = collector.export_stats_csv().unwrap();
        let csv = fs::read_to_string(&csv_path).unwrap();
        assert!(csv.starts_with("period_start,"));

        assert_eq!(collector.flush().unwrap(), 1);
        assert_eq!(collector.buffered_events(), 0);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_failed_flush_keeps_events() {
        let root = temp_dir("failed_flush");
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        // A regular file where the export directory's parent should be
        let blocker = root.join("not_a_dir");
        fs::write(&blocker, b"x").unwrap();

        let collector = TelemetryCollector::with_config(blocker.join("events"), 1000);
        collector.record(&score(SAMPLE_DIGITAL_ARREST_SMS), Channel::Sms, 5);
        assert_eq!(collector.buffered_events(), 1);

        assert!(collector.flush().is_err());
        assert_eq!(collector.buffered_events(), 1);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_failed_auto_flush_keeps_events_bounded() {
        let root = temp_dir("failed_auto_flush");
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        let blocker = root.join("not_a_dir");
        fs::write(&blocker, b"x").unwrap();

        let collector = TelemetryCollector::with_config(blocker.join("events"), 2);
        let threat = score(SAMPLE_DIGITAL_ARREST_SMS);
        for _ in 0..2 {
            collector.record(&threat, Channel::Email, 5);
        }
        assert_eq!(collector.buffered_events(), 2);

        for _ in 0..10 {
            collector.record(&threat, Channel::Email, 5);
        }
        assert_eq!(collector.buffered_events(), 4);

        let _ = fs::remove_dir_all(&root);
    }
}
