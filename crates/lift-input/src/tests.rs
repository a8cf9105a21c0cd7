//! Tests for the CSV loader.

use std::io::Cursor;

use lift_core::RequestId;

use crate::*;

#[cfg(test)]
mod loader_tests {
    use super::*;

    #[test]
    fn parses_and_orders_by_arrival() {
        let csv = "id,origin,destination,load,arrival_time\n\
                   0,1,9,75.0,30.0\n\
                   1,7,1,140.0,12.5\n\
                   2,1,4,60,30.0\n";
        let reqs = load_requests_reader(Cursor::new(csv)).unwrap();

        let ids: Vec<_> = reqs.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RequestId(1), RequestId(0), RequestId(2)]);
        assert_eq!(reqs[0].origin, 7);
        assert_eq!(reqs[0].destination, 1);
        assert_eq!(reqs[0].load, 140.0);
        assert!(reqs.iter().all(|r| !r.is_served()));
    }

    #[test]
    fn columns_in_any_order_with_padding() {
        let csv = "arrival_time, load, id, destination, origin, note\n\
                   5.0, 80, 3, 2, 6, lunch\n";
        let reqs = load_requests_reader(Cursor::new(csv)).unwrap();
        assert_eq!(reqs.len(), 1);
        assert_eq!((reqs[0].id, reqs[0].origin, reqs[0].destination), (RequestId(3), 6, 2));
    }

    #[test]
    fn header_only_is_empty() {
        let csv = "id,origin,destination,load,arrival_time\n";
        assert!(load_requests_reader(Cursor::new(csv)).unwrap().is_empty());
    }

    #[test]
    fn bad_number_is_a_parse_error() {
        let csv = "id,origin,destination,load,arrival_time\n\
                   0,1,nine,75.0,0\n";
        let err = load_requests_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, InputError::Parse(ref msg) if msg.starts_with("row 1")));
    }

    #[test]
    fn missing_column_is_a_parse_error() {
        let csv = "id,origin,destination,arrival_time\n0,1,9,0\n";
        assert!(matches!(load_requests_reader(Cursor::new(csv)), Err(InputError::Parse(_))));
    }

    #[test]
    fn non_finite_arrival_is_rejected() {
        let csv = "id,origin,destination,load,arrival_time\n0,1,9,75.0,NaN\n";
        assert!(matches!(load_requests_reader(Cursor::new(csv)), Err(InputError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_requests_csv(std::path::Path::new("/nonexistent/requests.csv")).unwrap_err();
        assert!(matches!(err, InputError::Io(_)));
    }
}
