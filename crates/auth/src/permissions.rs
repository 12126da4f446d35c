use crate::vocabulary::closed_vocabulary;

closed_vocabulary! {
    /// A named capability that a role can grant.
    pub enum Permission {
        // User management
        UserRead => "USER_READ",
        UserCreate => "USER_CREATE",
        UserEdit => "USER_EDIT",
        UserDelete => "USER_DELETE",

        // Role & permission management
        RoleRead => "ROLE_READ",
        RoleCreate => "ROLE_CREATE",
        RoleEdit => "ROLE_EDIT",
        RoleDelete => "ROLE_DELETE",

        // Structure management
        StructureRead => "STRUCTURE_READ",
        StructureCreate => "STRUCTURE_CREATE",
        StructureEdit => "STRUCTURE_EDIT",
        StructureDelete => "STRUCTURE_DELETE",

        // Structural unit management
        StructuralUnitRead => "STRUCTURAL_UNIT_READ",
        StructuralUnitCreate => "STRUCTURAL_UNIT_CREATE",
        StructuralUnitEdit => "STRUCTURAL_UNIT_EDIT",
        StructuralUnitDelete => "STRUCTURAL_UNIT_DELETE",

        ReportingRead => "REPORTING_READ",

        // Support
        SupportRead => "SUPPORT_READ",
        SupportCreate => "SUPPORT_CREATE",
        SupportApprove => "SUPPORT_APPROVE",
        SupportDelete => "SUPPORT_DELETE",

        // Personal information
        PersonalRead => "PERSONAL_READ",
        PersonalCreate => "PERSONAL_CREATE",
        PersonalEdit => "PERSONAL_EDIT",

        // Request submission
        RequestRead => "REQUEST_READ",
        RequestCreate => "REQUEST_CREATE",
        RequestEdit => "REQUEST_EDIT",
        RequestApprove => "REQUEST_APPROVE",

        // Inquiry receiving
        InquiryReceivingRead => "INQUIRY_RECEIVING_READ",
        InquiryReceivingCreate => "INQUIRY_RECEIVING_CREATE",
        InquiryReceivingAssign => "INQUIRY_RECEIVING_ASSIGN",
        InquiryReceivingApprove => "INQUIRY_RECEIVING_APPROVE",

        // Orders
        OrderRead => "ORDER_READ",
        OrderCreate => "ORDER_CREATE",
        OrderAssign => "ORDER_ASSIGN",
        OrderApprove => "ORDER_APPROVE",

        // Inquiries
        InquiryRead => "INQUIRY_READ",
        InquiryCreate => "INQUIRY_CREATE",
        InquiryAssign => "INQUIRY_ASSIGN",
        InquiryApprove => "INQUIRY_APPROVE",
    }
}

closed_vocabulary! {
    /// Breadth at which a permission is granted, narrowest first.
    pub enum PermissionLevel {
        Personal => "PERSONAL",
        Structure => "STRUCTURE",
        Directorate => "DIRECTORATE",
        Institution => "INSTITUTION",
        System => "SYSTEM",
    }
}
