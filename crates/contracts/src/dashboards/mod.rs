pub mod d400_lead_report;
