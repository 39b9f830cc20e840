//! Integration tests: JSON records -> vector and trend series

#[cfg(test)]
mod integration_tests {
    use crate::logic::error::PipelineError;
    use crate::logic::features::{trend_series, FeatureVector};
    use crate::logic::records::RecordSet;
    use crate::logic::schema::{Schema, CHART_FIELDS, FEATURE_COUNT, REQUIRED_FIELDS};

    const TWO_CYCLES: &str = r#"[
        {"Cutting_speed": 120, "Feed": 0.2, "Feed_rate": 24, "Power": 3.1,
         "Cooling": 1, "Process_Time": 45, "Material_K": 0, "Material_N": 1,
         "Material_P": 0, "Drill_Bit_Type_H": 1, "Drill_Bit_Type_N": 0,
         "Drill_Bit_Type_W": 0, "Operator": "kim"},
        {"Cutting_speed": "135", "Feed": 0.25, "Feed_rate": 33.75, "Power": 3.6,
         "Cooling": true, "Process_Time": null, "Material_K": 1, "Material_N": 0,
         "Material_P": 0, "Drill_Bit_Type_H": 0, "Drill_Bit_Type_N": 1,
         "Drill_Bit_Type_W": 0, "Operator": "lee"}
    ]"#;

    #[test]
    fn test_vector_from_json_records() {
        let records = RecordSet::from_json_str(TWO_CYCLES).unwrap();
        let vector = FeatureVector::build(&records, &[1, 0], &Schema::machining()).unwrap();

        assert_eq!(vector.len(), FEATURE_COUNT);
        assert_eq!(vector.get_by_name("Cutting_speed"), Some(120.0));
        assert_eq!(vector.get_by_name("Feed_rate"), Some(24.0));

        // Values follow schema order regardless of the file's column order
        for (i, (name, _)) in vector.named().enumerate() {
            assert_eq!(name, REQUIRED_FIELDS[i]);
        }
    }

    #[test]
    fn test_missing_cell_in_target_row() {
        let records = RecordSet::from_json_str(TWO_CYCLES).unwrap();
        let result = FeatureVector::build(&records, &[0, 1], &Schema::machining());

        assert_eq!(
            result,
            Err(PipelineError::non_numeric("Process_Time", "<missing>"))
        );
    }

    #[test]
    fn test_trend_gap_only_affects_its_series() {
        let records = RecordSet::from_json_str(TWO_CYCLES).unwrap();
        let series = trend_series(&records, &[0, 1], CHART_FIELDS).unwrap();

        let by_field = |name: &str| series.iter().find(|s| s.field == name).unwrap();

        assert_eq!(by_field("Process_Time").gaps(), 1);
        assert_eq!(by_field("Cutting_speed").gaps(), 0);
        assert_eq!(by_field("Cutting_speed").points[1].value, Some(135.0));
        assert_eq!(by_field("Cooling").points[1].value, Some(1.0));
        assert_eq!(by_field("Feed_rate").axis_label, "Feed Rate");
    }

    #[test]
    fn test_split_layout_keeps_explicit_indices() {
        let json = format!(
            r#"{{"columns": {}, "index": [7, 3], "data": [{}, {}]}}"#,
            serde_json::to_string(REQUIRED_FIELDS).unwrap(),
            serde_json::to_string(&vec![1.0; FEATURE_COUNT]).unwrap(),
            serde_json::to_string(&vec![2.0; FEATURE_COUNT]).unwrap(),
        );
        let records = RecordSet::from_json_str(&json).unwrap();

        let vector = FeatureVector::build(&records, &[3], &Schema::machining()).unwrap();
        assert_eq!(vector.values(), &[2.0; FEATURE_COUNT][..]);

        assert_eq!(
            FeatureVector::build(&records, &[0], &Schema::machining()),
            Err(PipelineError::UnknownRow { index: 0 })
        );
    }
}
