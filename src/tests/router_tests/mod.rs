mod listing_tests;
mod report_tests;
