#[cfg(test)]
mod tests {
    use segcap::{
        capture::{MaskAggregator, MaskRecord, BACKGROUND, FOREGROUND},
        hit::Hit,
        math::{Bounds2, Normal, Point2, Point3, Vec2},
        scene::{DetectableSet, ObjectId},
    };

    fn hit(object: u32) -> Option<Hit> {
        Some(Hit {
            t: 1.0,
            p: Point3::zeros(),
            n: Normal::new(0.0, 0.0, -1.0),
            object: ObjectId(object),
        })
    }

    #[test]
    fn record_new() {
        let record = MaskRecord::new(ObjectId(2), Vec2::new(4, 3), Point2::new(1, 2));
        assert_eq!(record.object(), ObjectId(2));
        assert_eq!(record.occupancy().len(), 12);
        assert_eq!(record.pixel_count(), 1);
        assert!(record.is_set(Point2::new(1, 2)));
        assert!(!record.is_set(Point2::new(2, 1)));
        assert_eq!(record.bounds(), Bounds2::point(Point2::new(1, 2)));
        assert_eq!(record.span(), Vec2::new(0, 0));
    }

    #[test]
    fn record_grows() {
        let mut record = MaskRecord::new(ObjectId(0), Vec2::new(10, 10), Point2::new(5, 5));
        record.mark(Point2::new(2, 7));
        record.mark(Point2::new(8, 1));
        // Marking twice changes nothing
        record.mark(Point2::new(8, 1));

        assert_eq!(record.pixel_count(), 3);
        assert_eq!(
            record.bounds(),
            Bounds2::new(Point2::new(2, 1), Point2::new(8, 7))
        );
        assert_eq!(record.span(), Vec2::new(6, 6));
        assert_eq!(record.tight_bounds(), Some(record.bounds()));
    }

    #[test]
    fn to_image() {
        let mut record = MaskRecord::new(ObjectId(0), Vec2::new(3, 2), Point2::new(0, 0));
        record.mark(Point2::new(2, 1));
        let image = record.to_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(*image.get_pixel(0, 0), FOREGROUND);
        assert_eq!(*image.get_pixel(2, 1), FOREGROUND);
        assert_eq!(*image.get_pixel(1, 0), BACKGROUND);
        assert_eq!(*image.get_pixel(0, 1), BACKGROUND);
    }

    #[test]
    fn misses_change_nothing() {
        let detectable = DetectableSet::from_ids(1, &[ObjectId(0)]);
        let mut aggregator = MaskAggregator::new(Vec2::new(4, 4), &detectable);
        for i in 0..4 {
            for j in 0..4 {
                aggregator.record(Point2::new(j, i), None);
            }
        }
        assert!(aggregator.records().is_empty());
    }

    #[test]
    fn lazy_records() {
        let detectable = DetectableSet::from_ids(3, &[ObjectId(1), ObjectId(2)]);
        let mut aggregator = MaskAggregator::new(Vec2::new(4, 4), &detectable);

        aggregator.record(Point2::new(0, 0), None);
        aggregator.record(Point2::new(1, 0), hit(2));
        aggregator.record(Point2::new(2, 0), hit(1));
        aggregator.record(Point2::new(3, 0), hit(2));
        aggregator.record(Point2::new(0, 3), hit(2));

        let records = aggregator.records();
        assert_eq!(records.len(), 2);
        // First hit order
        assert_eq!(records[0].object(), ObjectId(2));
        assert_eq!(records[1].object(), ObjectId(1));

        let two = aggregator.get(ObjectId(2)).unwrap();
        assert_eq!(two.pixel_count(), 3);
        assert_eq!(
            two.bounds(),
            Bounds2::new(Point2::new(0, 0), Point2::new(3, 3))
        );
        let one = aggregator.get(ObjectId(1)).unwrap();
        assert_eq!(one.pixel_count(), 1);
        assert_eq!(one.bounds(), Bounds2::point(Point2::new(2, 0)));
    }

    #[test]
    fn non_detectable_ignored() {
        let detectable = DetectableSet::from_ids(2, &[ObjectId(1)]);
        let mut aggregator = MaskAggregator::new(Vec2::new(2, 2), &detectable);
        aggregator.record(Point2::new(0, 0), hit(0));
        aggregator.record(Point2::new(1, 1), hit(5));
        assert!(aggregator.get(ObjectId(0)).is_none());
        assert!(aggregator.into_records().is_empty());
    }

    #[test]
    fn exclusive_pixels() {
        // Every pixel belongs to at most one record
        let detectable = DetectableSet::from_ids(3, &[ObjectId(0), ObjectId(1), ObjectId(2)]);
        let mut aggregator = MaskAggregator::new(Vec2::new(6, 6), &detectable);
        for i in 0..6 {
            for j in 0..6 {
                let object = (i * 6 + j) % 4;
                let h = if object < 3 { hit(object) } else { None };
                aggregator.record(Point2::new(j, i), h);
            }
        }

        let records = aggregator.into_records();
        assert_eq!(records.len(), 3);
        for offset in 0..36 {
            let owners = records.iter().filter(|r| r.occupancy()[offset]).count();
            assert_eq!(owners, usize::from(offset % 4 < 3));
        }
        for r in &records {
            assert_eq!(r.tight_bounds(), Some(r.bounds()));
        }
    }
}
