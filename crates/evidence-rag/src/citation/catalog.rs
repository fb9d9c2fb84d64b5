//! Built-in catalogue of known source documents and their hosted locations

/// File name to document URL
pub const KNOWN_SOURCES: &[(&str, &str)] = &[
    (
        "A Clinical Severity Index for Eosinophilic Esophagitis.pdf",
        "https://rdcrn.app.box.com/file/1806944500611",
    ),
    (
        "A Comparative Analysis of Eating Behavior of School-Aged Children with Eosinophilic Esophagitis and Their Caregivers_ Quality of Life_ Perspectives of Caregivers.pdf",
        "https://rdcrn.app.box.com/file/1806947473266",
    ),
    (
        "A Deep Multi-Label Segmentation Network For Eosinophilic.pdf",
        "https://rdcrn.app.box.com/file/1806944461539",
    ),
    (
        "A novel approach to conducting clinical trials in the community setting_ utilizing patient-driven platforms and social media to drive web-based patient recruitment.pdf",
        "https://rdcrn.app.box.com/file/1806932521580",
    ),
    (
        "Alignment of parent- and child-reported outcomes and histology in eosinophilic esophagitis across multiple CEGIR sites.pdf",
        "https://rdcrn.app.box.com/file/1806930362344",
    ),
    (
        "Allergic mechanisms of Eosinophilic oesophagitis.pdf",
        "https://rdcrn.app.box.com/file/1806947471313",
    ),
    (
        "Antifibrotic Effects of the Thiazolidinediones in Eosinophilic Esophagitis Pathologic Remodeling_ A Preclinical Evaluation.pdf",
        "https://rdcrn.app.box.com/file/1806945829739",
    ),
    (
        "Assessing Adherence and Barriers to Long-Term Elimination Diet Therapy in Adults with Eosinophilic Esophagitis.pdf",
        "https://rdcrn.app.box.com/file/1806946955778",
    ),
    (
        "Association Between Endoscopic and Histologic Findings in a Multicenter Retrospective Cohort of Patients with Non-esophageal Eosinophilic Gastrointestinal Disorders.pdf",
        "https://rdcrn.app.box.com/file/1806925663066",
    ),
    (
        "Autophagy mediates epithelial cytoprotection in eosinophilic oesophagitis.pdf",
        "https://rdcrn.app.box.com/file/1806945942226",
    ),
    (
        "a_multicenter_long_term_cohort_study_of.2.pdf",
        "https://rdcrn.app.box.com/file/1806947164012",
    ),
    (
        "Benralizumab for eosinophilic gastritis a single-site,.pdf",
        "https://rdcrn.app.box.com/file/1806946180452",
    ),
    (
        "CD73D Epithelial Progenitor Cells That Contribute to.pdf",
        "https://rdcrn.app.box.com/file/1806945011870",
    ),
    (
        "Characterization of eosinophilic esophagitis variants by clinical,.pdf",
        "https://rdcrn.app.box.com/file/1806945747887",
    ),
    (
        "Close follow‐up is associated with fewer stricture formation.pdf",
        "https://rdcrn.app.box.com/file/1806944286556",
    ),
    (
        "Comorbid Diagnosis of Eosinophilic Esophagitis and.pdf",
        "https://rdcrn.app.box.com/file/1806931506338",
    ),
    (
        "Creating a multi-center rare disease consortium _ the Consortium of Eosinophilic Gastrointestinal Disease Researchers _CEGIR_.pdf",
        "https://rdcrn.app.box.com/file/1806947265419",
    ),
    (
        "Defining the Patchy Landscape of Esophageal Eosinophilia in.pdf",
        "https://rdcrn.app.box.com/file/1806947901302",
    ),
    (
        "Detergent exposure induces epithelial barrier dysfunction andeosinophilic inflammation in the esophagus.pdf",
        "https://rdcrn.app.box.com/file/1806945582357",
    ),
    (
        "Development and Validation of Web-based Tool to Predict.pdf",
        "https://rdcrn.app.box.com/file/1806947631799",
    ),
    (
        "Diagnosis of Pediatric Non-Esophageal Eosinophilic Gastrointestinal Disorders by Eosinophil Peroxidase Immunohistochemistry.pdf",
        "https://rdcrn.app.box.com/file/1806943072770",
    ),
    (
        "Dilation of Pediatric Eosinophilic Esophagitis.pdf",
        "https://rdcrn.app.box.com/file/1806945961514",
    ),
    (
        "Direct-to-Consumer Recruitment Methods via Traditional and.pdf",
        "https://rdcrn.app.box.com/file/1806946091847",
    ),
    (
        "Early life factors are associated with risk for eosinophilic esophagitis diagnosed in adulthood.pdf",
        "https://rdcrn.app.box.com/file/1806946576676",
    ),
    (
        "Effects of allergen sensitization on response to therapy in children with eosinophilic esophagitis.pdf",
        "https://rdcrn.app.box.com/file/1806931077174",
    ),
    (
        "Efficacy and safety of dupilumab up to 52 weeks in adults.pdf",
        "https://rdcrn.app.box.com/file/1806944730328",
    ),
    (
        "Eosinophil Knockout Humans Uncovering the Role of.pdf",
        "https://rdcrn.app.box.com/file/1806947622671",
    ),
    (
        "Eosinophilic Esophagitis Patients Are Not at.pdf",
        "https://rdcrn.app.box.com/file/1806944246081",
    ),
    (
        "Eosinophilic Esophagitis(2).pdf",
        "https://rdcrn.app.box.com/file/1806930066958",
    ),
    (
        "Eosinophilic Esophagitis_ Existing and Upcoming Therapies in an Age of Emerging Molecular and Personalized Medicine.pdf",
        "https://rdcrn.app.box.com/file/1806947204812",
    ),
    (
        "Eosinophilic oesophagitis endotype classification by molecular_ clinical_ and histopathological analyses_ a cross-sectional study.pdf",
        "https://rdcrn.app.box.com/file/1806943710336",
    ),
    (
        "Epithelial HIF-1α claudin-1 axis regulates barrier.pdf",
        "https://rdcrn.app.box.com/file/1806947080578",
    ),
    (
        "Epithelial origin of eosinophilic esophagitis.pdf",
        "https://rdcrn.app.box.com/file/1806946326713",
    ),
    (
        "Esophageal Epithelium and Lamina Propria Are Unevenly.pdf",
        "https://rdcrn.app.box.com/file/1806947872259",
    ),
    (
        "Esophageal Manifestations of Dermatological Diseases,.pdf",
        "https://rdcrn.app.box.com/file/1806943139759",
    ),
    (
        "Evaluating Eosinophilic Colitis as a Unique Disease using.pdf",
        "https://rdcrn.app.box.com/file/1806946849658",
    ),
    (
        "Examining Disparities in Pediatric Eosinophilic.pdf",
        "https://rdcrn.app.box.com/file/1806930549544",
    ),
    (
        "Food allergen triggers are increased in children with the TSLP risk allele and eosinophilic esophagitis.pdf",
        "https://rdcrn.app.box.com/file/1806947514476",
    ),
    (
        "Genome-wide admixture and association analysis identifies African ancestry specific risk loci of eosinophilic esophagitis in African American.pdf",
        "https://rdcrn.app.box.com/file/1806945388098",
    ),
    (
        "Harnessing artificial intelligence to infer novel spatial biomarkers for the diagnosis of eosinophilic esophagitis.pdf",
        "https://rdcrn.app.box.com/file/1806943427237",
    ),
    (
        "High Patient Disease Burden in a Cross_sectional_ Multicenter Contact Registry Study of Eosinophilic Gastrointestinal Diseases.pdf",
        "https://rdcrn.app.box.com/file/1806928098293",
    ),
    (
        "Histologic improvement after 6 weeks of dietary elimination for eosinophilic esophagitis may be insufficient to determine efficacy.pdf",
        "https://rdcrn.app.box.com/file/1806943342990",
    ),
    (
        "Histological Phenotyping in Eosinophilic.pdf",
        "https://rdcrn.app.box.com/file/1806930047667",
    ),
    (
        "Human Epidemiology and RespOnse to SARS-CoV-2 (HEROS) Objectives, Design.pdf",
        "https://rdcrn.app.box.com/file/1806947399443",
    ),
    (
        "Impact of the COVID-19 Pandemic on People Living With Rare.pdf",
        "https://rdcrn.app.box.com/file/1806946065334",
    ),
    (
        "Impressions and Aspirations from the FDA GREAT VI Workshop.pdf",
        "https://rdcrn.app.box.com/file/1806948152579",
    ),
    (
        "Increasing Rates of Diagnosis, Substantial Co-occurrence, and.pdf",
        "https://rdcrn.app.box.com/file/1806932519666",
    ),
    (
        "Inflammation-associated microbiota in pediatric eosinophilic esophagitis.pdf",
        "https://rdcrn.app.box.com/file/1806943127793",
    ),
    (
        "International Consensus Recommendations for Eosinophilic.pdf",
        "https://rdcrn.app.box.com/file/1806945364783",
    ),
    (
        "Local type 2 immunity in eosinophilic gastritis.pdf",
        "https://rdcrn.app.box.com/file/1806947457540",
    ),
    (
        "Loss of Endothelial TSPAN12 Promotes Fibrostenotic.pdf",
        "https://rdcrn.app.box.com/file/1806943242663",
    ),
    (
        "Management of Esophageal Food Impaction Varies Among Gastroenterologists and Affects Identification of Eosinophilic Esophagitis.pdf",
        "https://rdcrn.app.box.com/file/1806947834259",
    ),
    (
        "Mast Cell Infiltration Is Associated With Persistent Symptoms and Endoscopic Abnormalities Despite Resolution of Eosinophilia in Pediatric Eosinophilic Esophagitis.pdf",
        "https://rdcrn.app.box.com/file/1806946859533",
    ),
    (
        "Molecular analysis of duodenal eosinophilia.pdf",
        "https://rdcrn.app.box.com/file/1806947303831",
    ),
    (
        "Motivations_ Barriers_ and Outcomes of Patient-Reported Shared Decision Making in Eosinophilic Esophagitis.pdf",
        "https://rdcrn.app.box.com/file/1806946309943",
    ),
    (
        "Mucosal Microbiota Associated With Eosinophilic.pdf",
        "https://rdcrn.app.box.com/file/1806948193919",
    ),
];
