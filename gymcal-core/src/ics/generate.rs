//! ICS file generation.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, EventLike, Property};

use crate::error::{GymcalError, GymcalResult};
use crate::event::{CalendarDocument, CalendarEvent};

/// Maximum line length in octets before folding (RFC 5545 §3.1)
const FOLD_LIMIT: usize = 75;

/// Generate .ics content for a whole calendar document
pub fn generate_ics(doc: &CalendarDocument) -> GymcalResult<String> {
    let mut cal = Calendar::new();
    cal.append_property(Property::new("X-WR-CALNAME", &doc.name));
    cal.append_property(Property::new("X-WR-TIMEZONE", doc.timezone.name()));

    for event in &doc.events {
        cal.push(to_ics_event(event, doc.stamp));
    }

    let cal = cal.done();
    let output = rewrite_header(&cal.to_string(), doc)?;

    Ok(output)
}

fn to_ics_event(event: &CalendarEvent, stamp: DateTime<Utc>) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.summary);

    // DTSTAMP is required by RFC 5545; a fixed value keeps output reproducible
    ics_event.add_property("DTSTAMP", stamp.format("%Y%m%dT%H%M%SZ").to_string());

    add_zoned_property(&mut ics_event, "DTSTART", &event.start);
    add_zoned_property(&mut ics_event, "DTEND", &event.end);

    ics_event.description(&event.description);
    ics_event.location(&event.location);

    if let Some(ref rule) = event.recurrence {
        ics_event.add_property("RRULE", rule.to_string());
    }

    ics_event.done()
}

/// Add a datetime property as local time with a TZID parameter
fn add_zoned_property(ics_event: &mut icalendar::Event, name: &str, time: &DateTime<Tz>) {
    let mut prop = Property::new(name, time.format("%Y%m%dT%H%M%S").to_string());
    prop.add_parameter("TZID", time.timezone().name());
    ics_event.append_property(prop);
}

/// Rewrite the icalendar crate's fixed header
/// - Replace VERSION and PRODID with the document's values
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn rewrite_header(ics: &str, doc: &CalendarDocument) -> GymcalResult<String> {
    if doc.product_id.contains(['\r', '\n']) {
        return Err(GymcalError::IcsGenerate(format!(
            "product id must be a single line: {:?}",
            doc.product_id
        )));
    }

    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            push_folded(&mut result, &format!("PRODID:{}", doc.product_id));
            continue;
        }

        if line.starts_with("VERSION:") {
            push_folded(&mut result, &format!("VERSION:{}", doc.version));
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    Ok(result)
}

/// Push a content line, folding it at FOLD_LIMIT octets on char boundaries
fn push_folded(out: &mut String, line: &str) {
    let mut width = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > FOLD_LIMIT {
            out.push_str("\r\n ");
            // the leading space counts toward the next line
            width = 1;
        }
        out.push(ch);
        width += len;
    }
    out.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::WeeklyRule;
    use crate::weekday::Weekday;
    use chrono::{Duration, TimeZone};

    fn make_test_doc() -> CalendarDocument {
        let tz = chrono_tz::America::Sao_Paulo;
        let start = tz.with_ymd_and_hms(2025, 11, 17, 18, 0, 0).unwrap();
        let mut doc = CalendarDocument::new(
            "-//Academia Treino ABC//SmartFit//",
            "Meu Treino ABC na Smart Fit",
            tz,
            Utc.with_ymd_and_hms(2025, 11, 14, 0, 0, 0).unwrap(),
        );
        doc.push(CalendarEvent {
            uid: "treino-treino-a-smartfit-abc".to_string(),
            summary: "Treino A".to_string(),
            start,
            end: start + Duration::minutes(90),
            location: "Smart Fit".to_string(),
            description: "Dia de treino: Treino A".to_string(),
            recurrence: Some(WeeklyRule {
                days: vec![Weekday::Mo, Weekday::Th],
                until: Utc.with_ymd_and_hms(2031, 1, 1, 2, 59, 59).unwrap(),
            }),
        });
        doc
    }

    #[test]
    fn test_generate_ics_header_fields() {
        let ics = generate_ics(&make_test_doc()).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"), "ICS:\n{}", ics);
        assert!(ics.contains("\r\nVERSION:2.0\r\n"));
        assert!(ics.contains("\r\nPRODID:-//Academia Treino ABC//SmartFit//\r\n"));
        assert!(ics.contains("\r\nX-WR-CALNAME:Meu Treino ABC na Smart Fit\r\n"));
        assert!(ics.contains("\r\nX-WR-TIMEZONE:America/Sao_Paulo\r\n"));
        assert!(!ics.contains("ICALENDAR-RS"), "default PRODID should be replaced");
        assert!(!ics.contains("CALSCALE"), "CALSCALE should be stripped");
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn test_generate_ics_event_fields() {
        let ics = generate_ics(&make_test_doc()).unwrap();

        assert!(
            ics.contains("DTSTART;TZID=America/Sao_Paulo:20251117T180000"),
            "DTSTART should carry TZID. ICS:\n{}",
            ics
        );
        assert!(ics.contains("DTEND;TZID=America/Sao_Paulo:20251117T193000"));
        assert!(ics.contains("RRULE:FREQ=WEEKLY;BYDAY=MO,TH;UNTIL=20310101T025959Z"));
        assert!(ics.contains("UID:treino-treino-a-smartfit-abc"));
        assert!(ics.contains("SUMMARY:Treino A"));
        assert!(ics.contains("LOCATION:Smart Fit"));
        assert!(ics.contains("DESCRIPTION:Dia de treino: Treino A"));
        assert!(ics.contains("DTSTAMP:20251114T000000Z"));
        assert_eq!(ics.lines().filter(|l| *l == "BEGIN:VEVENT").count(), 1);
    }

    #[test]
    fn test_generate_ics_is_reproducible() {
        let doc = make_test_doc();
        assert_eq!(generate_ics(&doc).unwrap(), generate_ics(&doc).unwrap());
    }

    #[test]
    fn test_generate_ics_without_rrule() {
        let mut doc = make_test_doc();
        doc.events[0].recurrence = None;
        let ics = generate_ics(&doc).unwrap();
        assert!(!ics.contains("RRULE"));
    }

    #[test]
    fn test_long_product_id_is_folded() {
        let mut doc = make_test_doc();
        doc.product_id = format!("-//{}//", "x".repeat(100));
        let ics = generate_ics(&doc).unwrap();

        for line in ics.split("\r\n") {
            assert!(line.len() <= FOLD_LIMIT, "line too long: {line}");
        }
        assert!(ics.contains("\r\n x"));
    }

    #[test]
    fn test_multiline_product_id_is_rejected() {
        let mut doc = make_test_doc();
        doc.product_id = "a\nb".to_string();
        assert!(matches!(
            generate_ics(&doc),
            Err(GymcalError::IcsGenerate(_))
        ));
    }

    #[test]
    fn push_folded_respects_multibyte_chars() {
        let mut out = String::new();
        push_folded(&mut out, &"é".repeat(60));
        for line in out.split("\r\n") {
            assert!(line.len() <= FOLD_LIMIT);
        }
        assert_eq!(out.replace("\r\n ", "").trim_end(), "é".repeat(60));
    }
}
