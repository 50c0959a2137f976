use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{CallbackAction, GenerationInfo};

/// Records the population spread via DE callbacks, every `stride` generations
#[derive(Debug, Clone)]
pub struct DiversityRecorder {
    stride: usize,
    records: Arc<Mutex<Vec<DiversityRecord>>>,
}

/// One sample of the diversity trace
#[derive(Debug, Clone, PartialEq)]
pub struct DiversityRecord {
    /// Generation number, 0 for the initial population
    pub generation: usize,
    /// Evaluations spent in the call so far
    pub evaluations: usize,
    pub best_value: f64,
    /// Per-dimension standard deviation of the decoded population
    pub diversity: Vec<f64>,
}

impl DiversityRecorder {
    /// Sample every `stride` generations, starting with the initial population.
    /// The sweep uses the problem dimension as stride.
    pub fn new(stride: usize) -> Self {
        Self { stride: stride.max(1), records: Arc::new(Mutex::new(Vec::new())) }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DiversityRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a callback function that records the trace
    pub fn create_callback(&self) -> Box<dyn FnMut(&GenerationInfo) -> CallbackAction + Send> {
        let records = self.records.clone();
        let stride = self.stride;

        Box::new(move |info: &GenerationInfo| -> CallbackAction {
            if info.generation % stride == 0 {
                let mut guard = records.lock().unwrap_or_else(PoisonError::into_inner);
                guard.push(DiversityRecord {
                    generation: info.generation,
                    evaluations: info.evaluations,
                    best_value: info.best_value,
                    diversity: info.diversity.to_vec(),
                });
            }
            CallbackAction::Continue
        })
    }

    /// Get a copy of all recorded samples
    pub fn records(&self) -> Vec<DiversityRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Write the trace, see [`write_diversity_trace`]
    pub fn write_trace<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        write_diversity_trace(&self.lock(), writer)
    }

    /// Save the trace to `path`
    pub fn save_trace(&self, path: &Path) -> Result<(), csv::Error> {
        let file = std::fs::File::create(path)?;
        self.write_trace(io::BufWriter::new(file))
    }
}

/// Write a trace: one space separated line of standard deviations per sample.
pub fn write_diversity_trace<W: io::Write>(
    records: &[DiversityRecord],
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b' ').has_headers(false).from_writer(writer);
    for record in records {
        wtr.write_record(record.diversity.iter().map(|sd| format!("{:.30}", sd)))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn info(generation: usize) -> GenerationInfo {
        GenerationInfo {
            generation,
            evaluations: (generation + 1) * 10,
            best_value: 1.0 / (generation + 1) as f64,
            best_x: Array1::zeros(2),
            diversity: Array1::from(vec![0.5, 0.25]),
        }
    }

    #[test]
    fn test_records_every_stride() {
        let recorder = DiversityRecorder::new(3);
        let mut cb = recorder.create_callback();
        for g in 0..8 {
            assert!(matches!(cb(&info(g)), CallbackAction::Continue));
        }
        let gens: Vec<usize> = recorder.records().iter().map(|r| r.generation).collect();
        assert_eq!(gens, vec![0, 3, 6]);
        recorder.clear();
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_trace_format() {
        let recorder = DiversityRecorder::new(1);
        let mut cb = recorder.create_callback();
        cb(&info(0));
        cb(&info(1));

        let mut out = Vec::new();
        recorder.write_trace(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let fields: Vec<f64> = lines[0].split(' ').map(|s| s.parse().unwrap()).collect();
        assert_eq!(fields, vec![0.5, 0.25]);
    }

    #[test]
    fn test_save_trace() {
        let tmp = tempfile::tempdir().unwrap();
        let recorder = DiversityRecorder::new(2);
        let mut cb = recorder.create_callback();
        for g in 0..5 {
            cb(&info(g));
        }
        let path = tmp.path().join("trace-sd.txt");
        recorder.save_trace(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }
}
