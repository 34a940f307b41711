// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeMap;

use crate::badges::model::BadgeId;
use crate::badges::model::BadgeStatus;
use crate::badges::model::NursingBadge;

/// The clinical skill badges every student starts with.
pub fn default_badges() -> BTreeMap<BadgeId, NursingBadge> {
    let entries = [
        ("hand-hygiene", "Hand Hygiene", "Infection Control", "Perform the five moments of hand hygiene with correct technique.", 60, 80),
        ("vital-signs", "Vital Signs", "Assessment", "Measure temperature, pulse, respiration and blood pressure.", 60, 80),
        ("medication-administration", "Medication Administration", "Medication", "Apply the rights of medication administration for oral drugs.", 70, 90),
        ("im-injection", "Intramuscular Injection", "Medication", "Select the site and administer an intramuscular injection.", 70, 85),
        ("iv-therapy", "IV Therapy", "Medication", "Prepare and monitor a peripheral intravenous infusion.", 70, 85),
        ("urinary-catheter", "Urinary Catheterization", "Elimination", "Insert an indwelling urinary catheter using sterile technique.", 65, 85),
        ("ng-tube", "Nasogastric Tube", "Nutrition", "Insert a nasogastric tube and verify its placement.", 65, 85),
        ("wound-dressing", "Wound Dressing", "Skin Integrity", "Perform a sterile dressing change and document the wound.", 60, 80),
        ("bls", "Basic Life Support", "Emergency", "Deliver high-quality CPR and use an AED.", 70, 90),
    ];
    entries
        .into_iter()
        .map(|(id, title, category, description, required_score, passing_score)| {
            let badge = NursingBadge {
                id: BadgeId::new(id),
                title: title.to_string(),
                category: category.to_string(),
                description: description.to_string(),
                required_score,
                passing_score,
                max_score: 100,
                current_score: 0,
                attempts: 0,
                score_history: Vec::new(),
                status: BadgeStatus::Pending,
                completed_date: None,
            };
            (badge.id.clone(), badge)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_ordered() {
        let badges = default_badges();
        assert_eq!(badges.len(), 9);
        for badge in badges.values() {
            assert!(badge.required_score <= badge.passing_score);
            assert!(badge.passing_score <= badge.max_score);
            assert_eq!(badge.status, BadgeStatus::Pending);
        }
    }
}
