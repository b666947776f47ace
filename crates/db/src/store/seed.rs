//! Demo records loaded into the Mock Store at startup.

use chrono::{Datelike, Duration};
use suvidha_core::billing::{receipt_number, BILL_OVERDUE, BILL_PAID, BILL_PENDING};
use suvidha_core::complaint::{
    format_complaint_id, STATUS_ASSIGNED, STATUS_IN_PROGRESS, STATUS_RESOLVED,
};
use suvidha_core::roles::{ROLE_ADMIN, ROLE_OFFICER};
use suvidha_core::types::Timestamp;

use super::mock::MockData;
use crate::models::bill::Bill;
use crate::models::citizen::Citizen;
use crate::models::complaint::{Complaint, ComplaintChange, ComplaintUpdate, NewComplaint};
use crate::models::kiosk::{Kiosk, KIOSK_MAINTENANCE, KIOSK_OFFLINE, KIOSK_ONLINE};
use crate::models::officer::Officer;

pub(super) fn demo_data(now: Timestamp) -> MockData {
    MockData {
        citizens: citizens(now),
        officers: officers(),
        complaints: complaints(now),
        kiosks: kiosks(now),
        bills: bills(now),
        ..MockData::default()
    }
}

fn citizens(now: Timestamp) -> Vec<Citizen> {
    [
        ("CIT-0001", "Ramesh Kumar", "9876543210", 12),
        ("CIT-0002", "Sunita Devi", "9812345678", 7),
        ("CIT-0003", "Mohammed Irfan", "9898989898", 12),
    ]
    .into_iter()
    .map(|(id, name, phone, ward)| Citizen {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        email: None,
        address: Some(format!("Ward {ward}, New Delhi")),
        ward: Some(ward),
        created_at: now - Duration::days(30),
    })
    .collect()
}

fn officers() -> Vec<Officer> {
    [
        ("OFF-001", "Anita Sharma", "administration", ROLE_ADMIN),
        ("OFF-002", "Vikram Singh", "electricity", ROLE_OFFICER),
        ("OFF-003", "Priya Nair", "water", ROLE_OFFICER),
        ("OFF-004", "Arjun Mehta", "sanitation", ROLE_OFFICER),
    ]
    .into_iter()
    .map(|(id, name, department, role)| Officer {
        id: id.to_string(),
        name: name.to_string(),
        department: department.to_string(),
        role: role.to_string(),
        phone: None,
        active: true,
    })
    .collect()
}

fn kiosks(now: Timestamp) -> Vec<Kiosk> {
    [
        ("KSK-001", "Connaught Place Kiosk", "Connaught Place", 28.6315, 77.2167, KIOSK_ONLINE),
        ("KSK-002", "Karol Bagh Kiosk", "Karol Bagh", 28.6519, 77.1909, KIOSK_ONLINE),
        ("KSK-003", "Lajpat Nagar Kiosk", "Lajpat Nagar", 28.5677, 77.2433, KIOSK_MAINTENANCE),
        ("KSK-004", "Dwarka Sector 10 Kiosk", "Dwarka", 28.5815, 77.0590, KIOSK_OFFLINE),
    ]
    .into_iter()
    .map(|(id, name, location, latitude, longitude, status)| Kiosk {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        latitude,
        longitude,
        status: status.to_string(),
        last_heartbeat: (status == KIOSK_ONLINE).then_some(now),
    })
    .collect()
}

fn bills(now: Timestamp) -> Vec<Bill> {
    let today = now.date_naive();
    let paid_at = now - Duration::days(20);
    let bill = |id: &str, citizen: &str, utility: &str, amount_paise: i64, due_in: i64, status: &str| Bill {
        id: id.to_string(),
        citizen_id: citizen.to_string(),
        utility: utility.to_string(),
        amount_paise,
        due_date: today + Duration::days(due_in),
        status: status.to_string(),
        paid_at: (status == BILL_PAID).then_some(paid_at),
        receipt_number: (status == BILL_PAID).then(|| receipt_number(id, paid_at)),
        created_at: now - Duration::days(25),
    };

    vec![
        bill("BILL-0001", "CIT-0001", "electricity", 184_550, 10, BILL_PENDING),
        bill("BILL-0002", "CIT-0001", "water", 42_000, -3, BILL_OVERDUE),
        bill("BILL-0003", "CIT-0001", "gas", 96_075, -20, BILL_PAID),
        bill("BILL-0004", "CIT-0002", "electricity", 120_000, 5, BILL_PENDING),
        bill("BILL-0005", "CIT-0003", "property_tax", 850_000, 45, BILL_PENDING),
    ]
}

fn complaints(now: Timestamp) -> Vec<Complaint> {
    let year = now.year();

    let seeds = [
        (
            "CIT-0001",
            "electricity",
            "Frequent power cuts in the evening",
            "high",
            "Ward 12, Karol Bagh",
            Duration::hours(30),
        ),
        (
            "CIT-0002",
            "water",
            "Contaminated water supply since Monday",
            "critical",
            "Ward 7, Lajpat Nagar",
            Duration::hours(20),
        ),
        (
            "CIT-0003",
            "sanitation",
            "Garbage not collected for a week",
            "medium",
            "Ward 12, Paharganj",
            Duration::hours(50),
        ),
        (
            "CIT-0001",
            "roads",
            "Large pothole near the bus stop",
            "low",
            "Ward 12, Karol Bagh",
            Duration::hours(8),
        ),
    ];

    let mut complaints: Vec<Complaint> = seeds
        .into_iter()
        .enumerate()
        .map(|(i, (citizen, category, description, priority, address, age))| {
            Complaint::register(
                format_complaint_id(year, i as u64 + 1),
                NewComplaint {
                    citizen_id: Some(citizen.to_string()),
                    category: category.to_string(),
                    description: description.to_string(),
                    priority: priority.to_string(),
                    latitude: 28.6139,
                    longitude: 77.2090,
                    address: address.to_string(),
                },
                now - age,
            )
        })
        .collect();

    // (complaint index, status, officer, comment, hours ago)
    let progress = [
        (0, STATUS_ASSIGNED, "OFF-002", "Lineman assigned", 28),
        (0, STATUS_IN_PROGRESS, "OFF-002", "Transformer inspection under way", 6),
        (1, STATUS_ASSIGNED, "OFF-003", "Water quality team notified", 18),
        (2, STATUS_RESOLVED, "OFF-004", "Garbage cleared and route rescheduled", 2),
    ];

    for (index, status, officer, comment, hours_ago) in progress {
        let at = now - Duration::hours(hours_ago);
        let complaint = &mut complaints[index];
        let change = ComplaintChange {
            status: status.to_string(),
            resolved_at: (status == STATUS_RESOLVED).then_some(at),
            assigned_officer_id: Some(officer.to_string()),
            updated_at: at,
            log: ComplaintUpdate {
                complaint_id: complaint.id.clone(),
                status: status.to_string(),
                comment: Some(comment.to_string()),
                author_role: ROLE_OFFICER.to_string(),
                author_id: Some(officer.to_string()),
                created_at: at,
            },
            audit: None,
        };
        complaint.apply(&change);
    }

    complaints
}
