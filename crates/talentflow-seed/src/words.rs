pub const JOB_TITLES: &[&str] = &[
    "Senior Frontend Developer",
    "Full Stack Engineer",
    "React Developer",
    "Node.js Developer",
    "Python Developer",
    "DevOps Engineer",
    "Product Manager",
    "UX Designer",
    "Data Scientist",
    "Machine Learning Engineer",
    "Backend Developer",
    "Mobile Developer",
    "QA Engineer",
    "Technical Lead",
    "Software Architect",
    "Cloud Engineer",
    "Security Engineer",
    "Data Engineer",
    "Frontend Engineer",
    "JavaScript Developer",
    "TypeScript Developer",
    "Vue.js Developer",
    "Angular Developer",
    "iOS Developer",
    "Android Developer",
];

pub const TAGS: &[&str] = &[
    "React", "TypeScript", "Node.js", "Python", "JavaScript", "AWS", "Docker",
    "Kubernetes", "PostgreSQL", "MongoDB", "Redis", "GraphQL", "REST API",
    "Microservices", "Agile", "Remote", "Senior", "Mid-level", "Junior",
    "Full-time", "Part-time", "Contract", "Frontend", "Backend", "Full-stack",
];

pub const LOCATIONS: &[&str] = &[
    "New York", "San Francisco", "London", "Berlin", "Toronto", "Remote", "Austin",
    "Seattle", "Bangalore", "Sydney",
];

pub const MILESTONES: &[&str] = &[
    "Resume screen",
    "Phone screen",
    "Technical interview",
    "Onsite interview",
    "Offer",
];

pub const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Amara", "Bea", "Carlos", "Chen", "Dara", "Elif", "Farah", "Gus",
    "Hana", "Ines", "Jonas", "Kofi", "Lena", "Mateo", "Nia", "Omar", "Priya", "Quinn",
    "Rosa", "Sami", "Tariq", "Uma", "Vera", "Wen", "Yara", "Zane",
];

pub const LAST_NAMES: &[&str] = &[
    "Abara", "Bergstrom", "Costa", "Dubois", "Eze", "Fischer", "Garcia", "Haddad",
    "Ivanova", "Jensen", "Kowalski", "Lindqvist", "Moreau", "Nakamura", "Okafor",
    "Petrov", "Quispe", "Rossi", "Silva", "Tanaka", "Umarov", "Varga", "Wright",
];

pub const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit",
    "sed", "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore",
    "magna", "aliqua", "enim", "ad", "minim", "veniam", "quis", "nostrud",
    "exercitation", "ullamco", "laboris", "nisi", "aliquip", "ex", "ea", "commodo",
];

pub const UPLOADS: &[&str] = &[
    "resume.pdf",
    "portfolio.zip",
    "cover-letter.docx",
    "take-home.tar.gz",
];
