use super::*;

#[test]
fn status_writer_sends_non_empty_lines_on_drop() {
    let (tx, rx) = mpsc::channel();
    {
        let mut writer = StatusWriter::new(tx);
        writer.write_all(b" INFO folder deleted  \n\n").unwrap();
        writer.write_all(b"second").unwrap();
        assert!(rx.try_recv().is_err());
    }
    assert_eq!(
        rx.try_iter().collect::<Vec<_>>(),
        vec!["INFO folder deleted", "second"]
    );
}

#[test]
fn empty_writer_sends_nothing() {
    let (tx, rx) = mpsc::channel();
    drop(StatusWriter::new(tx));
    assert!(rx.try_recv().is_err());
}

#[test]
fn long_events_are_cut_to_one_status_row() {
    let long = "é".repeat(STATUS_MAX_CHARS + 20);
    let line = status_line(&long).unwrap();
    assert_eq!(line.chars().count(), STATUS_MAX_CHARS);
    assert!(line.ends_with('…'));

    assert_eq!(status_line("   "), None);
    assert_eq!(status_line("short").as_deref(), Some("short"));
}
