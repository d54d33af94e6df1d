/// A complete configuration exercising every section the loader supports.
pub(crate) fn full_config_bytes() -> Vec<u8> {
    br#"
data_sources:
  - type: csv
    source: "./data/final_result_dates.csv"
    separator: ","
    table:
      role: result_dates
      patient_id: "CSN"
      result_date: "Final_Result_Date"
  - type: excel
    source: "./data/mssa_export.xlsx"
    sheets:
      - sheet_name: "dot"
        table:
          role: administrations
          patient_id: "CSN"
          drug: "ABX_Category"
          first_admin: "First_Admin"
          last_admin: "Last_Admin"
      - sheet_name: "dem"
        table:
          role: demographics
          patient_id: "CSN"
pipeline_config:
  study:
    ignored_drugs:
      - "Ampicillin"
    narrow_spectrum_drugs:
      - "Cefazolin"
      - "Nafcillin"
  loader:
    excel:
      output_path: "./output/summary.xlsx"
"#
    .to_vec()
}
