use super::*;

#[test]
fn stat_tiles_cover_every_count_and_rate() {
    let summary = DailySummary {
        date: "2026-10-17".into(),
        total_students: 4,
        present: 2,
        absent: 1,
        late: 1,
        excused: 0,
        unmarked: 0,
    };
    let tiles = stat_tiles(&summary);
    let labels: Vec<&str> = tiles.iter().map(|(label, _)| *label).collect();
    assert_eq!(labels, ["Students", "Present", "Absent", "Late", "Excused", "Unmarked", "Attendance"]);
    assert_eq!(tiles[0].1, "4");
    assert_eq!(tiles[6].1, "75.0%");
}

#[test]
fn stat_tiles_with_no_students_show_zero_rate() {
    let tiles = stat_tiles(&DailySummary::default());
    assert_eq!(tiles[6].1, "0.0%");
}
