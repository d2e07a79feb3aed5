//! Built-in sample listings for running the analysis without a live portal.

use crate::models::ListingFields;

const SAMPLE: &[[&str; 5]] = &[
    [
        "Data Analyst - Business Intelligence",
        "TechCorp India",
        "Bangalore, Karnataka",
        "6-8 LPA",
        "Python, SQL, Tableau, Excel, Power BI, data visualization, business intelligence",
    ],
    [
        "Junior Data Analyst",
        "Analytics Solutions",
        "Mumbai, Maharashtra",
        "4-6 LPA",
        "SQL, Excel, Python, pandas, matplotlib, reporting",
    ],
    [
        "Senior Data Analyst",
        "DataTech Pvt Ltd",
        "Hyderabad, Telangana",
        "8-12 LPA",
        "Python, R, SQL, machine learning, statistics, Tableau, Power BI",
    ],
    [
        "Business Data Analyst",
        "Enterprise Solutions",
        "Pune, Maharashtra",
        "5-7 LPA",
        "SQL, Excel, Tableau, business intelligence, data visualization",
    ],
    [
        "Data Analyst Intern",
        "StartupXYZ",
        "Bangalore, Karnataka",
        "2-3 LPA",
        "Python, pandas, numpy, matplotlib, jupyter, git, Excel",
    ],
    [
        "Financial Data Analyst",
        "FinanceCorps",
        "Delhi, NCR",
        "7-9 LPA",
        "SQL, Python, Excel, financial modeling, Tableau, Power BI",
    ],
    [
        "Marketing Data Analyst",
        "AdTech Solutions",
        "Mumbai, Maharashtra",
        "5-8 LPA",
        "SQL, Google Analytics, Tableau, Excel, PowerBI, marketing analytics",
    ],
    [
        "Healthcare Data Analyst",
        "MedAnalytics",
        "Bangalore, Karnataka",
        "6-10 LPA",
        "R, SQL, Python, healthcare analytics, statistics, data mining",
    ],
];

/// Eight data analyst listings as a job portal would present them.
pub fn sample_listings() -> Vec<ListingFields> {
    SAMPLE
        .iter()
        .map(|[title, company, location, salary, description]| ListingFields {
            title: Some(title.to_string()),
            company: Some(company.to_string()),
            location: Some(location.to_string()),
            salary: Some(salary.to_string()),
            description: Some(description.to_string()),
        })
        .collect()
}
