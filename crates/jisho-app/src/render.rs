use std::fmt::Write;
use std::io::Write as _;

use jisho_core::SearchSnapshot;
use jisho_core::romaji;
use jisho_types::Entry;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Write the search state every time it changes
///
/// On shutdown a state published but not yet written is still written.
pub async fn render_loop<W>(
    mut snapshots: watch::Receiver<SearchSnapshot>,
    cancel: CancellationToken,
    mut out: W,
) -> anyhow::Result<()>
where
    W: std::io::Write + Send + 'static,
{
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                if snapshots.has_changed().unwrap_or(false) {
                    write_snapshot(&mut snapshots, &mut out)?;
                }
                break;
            }
            changed = snapshots.changed() => changed?,
        }

        write_snapshot(&mut snapshots, &mut out)?;
    }

    Ok(())
}

fn write_snapshot(
    snapshots: &mut watch::Receiver<SearchSnapshot>,
    out: &mut impl std::io::Write,
) -> std::io::Result<()> {
    let snapshot = snapshots.borrow_and_update().clone();
    out.write_all(render(&snapshot).as_bytes())?;
    out.flush()
}

/// Cloneable in-memory output
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[cfg(test)]
impl std::io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub fn render(snapshot: &SearchSnapshot) -> String {
    let mut out = String::new();
    let query = snapshot.query.text();

    if snapshot.pending {
        let _ = writeln!(out, "> {query}  (searching...)");
    } else {
        let _ = writeln!(out, "> {query}");
    }

    if let Some(suggestion) = romaji::suggest(query) {
        let _ = writeln!(out, "Search for {} instead? (:kana)", suggestion.kana);
    }

    if let Some(error) = &snapshot.last_error {
        let _ = writeln!(out, "Search failed: {error}");
    } else if !snapshot.pending && snapshot.is_empty() && !snapshot.query.is_blank() {
        let _ = writeln!(out, "No results");
    }

    for (index, entry) in snapshot.results.iter().enumerate() {
        render_entry(&mut out, index + 1, entry);
    }

    out
}

fn render_entry(out: &mut String, number: usize, entry: &Entry) {
    let _ = write!(out, "{number}. {}", entry.headword());
    if let Some(furigana) = entry.furigana() {
        let _ = write!(out, " 【{furigana}】");
    }

    let mut labels = Vec::new();
    if entry.is_common {
        labels.push("common word".to_string());
    }
    if let Some(jlpt) = entry.jlpt_label() {
        labels.push(jlpt);
    }
    if let Some(level) = entry.wanikani_level() {
        labels.push(format!("Wanikani level {level}"));
    }
    if !labels.is_empty() {
        let _ = write!(out, "  [{}]", labels.join(" | "));
    }
    out.push('\n');

    for (index, sense) in entry.senses.iter().enumerate() {
        if !sense.parts_of_speech.is_empty() {
            let _ = writeln!(out, "   {}", sense.parts_of_speech.join(", "));
        }

        let _ = write!(
            out,
            "   {}. {}",
            index + 1,
            sense.english_definitions.join("; ")
        );
        if let Some(target) = sense.see_also_target() {
            let _ = write!(out, "  See also {target}");
        }
        if let Some(info) = sense.info.first() {
            if sense.see_also_target().is_some() {
                out.push(',');
            }
            let _ = write!(out, "  {info}");
        }
        out.push('\n');
    }
}
